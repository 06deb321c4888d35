// emsx/src/bin/emsx.rs

use std::path::PathBuf;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use emsx::{
    allowed_pages, check_action, demo_user, get_emsx_session_middleware, page_title,
    register_all_emsx_routes, resolve_resource, setup_emsx_logging, Dataset, EmsxConfig, Role,
    VisibleScope,
};

#[derive(Parser)]
#[command(name = "emsx")]
#[command(about = "EMSX access-control CLI and dashboard API server")]
#[command(version)]
struct Cli {
    /// JSON dataset to use instead of the embedded seed
    #[arg(long, global = true, env = "EMSX_DATASET")]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind host (overrides EMSX_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides EMSX_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask whether a role may perform an action
    Check {
        #[arg(short, long)]
        role: String,
        /// Action such as employee:edit
        #[arg(short, long)]
        action: String,
        /// Target record as kind:id, e.g. project:proj-001
        #[arg(long)]
        resource: Option<String>,
    },
    /// List the records a role can see
    Visible {
        #[arg(short, long)]
        role: String,
        /// employees, projects, reviews, work-logs or allocations
        #[arg(short, long)]
        entity: String,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// List the pages a role may open
    Pages {
        #[arg(short, long)]
        role: String,
    },
    /// Check the dataset for broken references
    Validate,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EmsxConfig::from_env().context("invalid EMSX configuration")?;
    if cli.dataset.is_some() {
        config.dataset_path = cli.dataset.clone();
    }
    setup_emsx_logging(&config);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        Commands::Check { role, action, resource } => {
            check(&config, &role, &action, resource.as_deref())?;
        }
        Commands::Visible { role, entity, format } => {
            visible(&config, &role, &entity, &format)?;
        }
        Commands::Pages { role } => {
            pages(&role)?;
        }
        Commands::Validate => {
            validate(&config)?;
        }
    }

    Ok(())
}

fn parse_role(role: &str) -> Result<Role> {
    role.parse::<Role>()
        .context("expected one of admin, hr, manager, employee")
}

async fn serve(config: EmsxConfig) -> Result<()> {
    let dataset = config.load_dataset().context("failed to load dataset")?;
    dataset.validate().context("dataset failed validation")?;
    let dataset = web::Data::new(dataset);
    let bind = config.bind_address();

    info!("🚀 EMSX listening on http://{}:{}/emsx", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(dataset.clone())
            .wrap(get_emsx_session_middleware(&config))
            .wrap(Logger::default())
            .service(register_all_emsx_routes())
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}

fn check(config: &EmsxConfig, role: &str, action: &str, resource: Option<&str>) -> Result<()> {
    let user = demo_user(parse_role(role)?);
    let dataset = config.load_dataset()?;
    let target = resource.map(|r| resolve_resource(&dataset, r)).transpose()?;

    let allowed = check_action(&user, action, target);
    println!(
        "{} {} {}{}",
        if allowed { "ALLOW" } else { "DENY" },
        user.role,
        action,
        resource.map(|r| format!(" on {}", r)).unwrap_or_default()
    );
    Ok(())
}

fn visible(config: &EmsxConfig, role: &str, entity: &str, format: &str) -> Result<()> {
    let user = demo_user(parse_role(role)?);
    let dataset = config.load_dataset()?;
    let scope = VisibleScope::new(&dataset, Some(&user));

    let rows: Vec<(String, String, String)> = match entity {
        "employees" => scope
            .employees()
            .into_iter()
            .map(|e| (e.id.clone(), e.name.clone(), e.designation.clone()))
            .collect(),
        "projects" => scope
            .projects()
            .into_iter()
            .map(|p| (p.id.clone(), p.name.clone(), p.manager_name.clone()))
            .collect(),
        "reviews" => scope
            .reviews()
            .into_iter()
            .map(|r| (r.id.clone(), r.employee_name.clone(), r.reviewer_name.clone()))
            .collect(),
        "work-logs" => scope
            .work_logs()
            .into_iter()
            .map(|l| (l.id.clone(), l.employee_name.clone(), l.date.to_string()))
            .collect(),
        "allocations" => scope
            .allocations()
            .into_iter()
            .map(|a| (a.id.clone(), a.employee_name.clone(), a.project_name.clone()))
            .collect(),
        other => bail!("unknown entity {:?}", other),
    };

    match format {
        "json" => {
            let json = match entity {
                "employees" => serde_json::to_string_pretty(&scope.employees())?,
                "projects" => serde_json::to_string_pretty(&scope.projects())?,
                "reviews" => serde_json::to_string_pretty(&scope.reviews())?,
                "work-logs" => serde_json::to_string_pretty(&scope.work_logs())?,
                _ => serde_json::to_string_pretty(&scope.allocations())?,
            };
            println!("{}", json);
        }
        "table" => {
            if rows.is_empty() {
                println!("No {} visible to {}", entity, user.role);
                return Ok(());
            }
            println!("{:<14} {:<28} {:<28}", "ID", "Name", "Detail");
            println!("{}", "-".repeat(70));
            for (id, name, detail) in rows {
                println!("{:<14} {:<28} {:<28}", id, name, detail);
            }
        }
        other => bail!("unknown format {:?}; use table or json", other),
    }

    Ok(())
}

fn pages(role: &str) -> Result<()> {
    let role = parse_role(role)?;
    for page in allowed_pages(role) {
        println!("{:<16} {}", page.as_str(), page_title(page.as_str(), role));
    }
    Ok(())
}

fn validate(config: &EmsxConfig) -> Result<()> {
    let dataset: Dataset = config.load_dataset()?;
    dataset.validate()?;
    println!(
        "Dataset OK: {} employees, {} projects, {} allocations, {} reviews, {} work logs",
        dataset.employees.len(),
        dataset.projects.len(),
        dataset.allocations.len(),
        dataset.reviews.len(),
        dataset.work_logs.len()
    );
    Ok(())
}
