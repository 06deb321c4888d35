// emsx/src/configs/initializer.rs
use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use env_logger::Env;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

use crate::models::dataset::{Dataset, DatasetError};

const MIN_SESSION_SECRET_LEN: usize = 64;

static LOGGING: OnceCell<()> = OnceCell::new();
static GENERATED_KEY: OnceCell<Key> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("SESSION_SECRET must be at least {} bytes long", MIN_SESSION_SECRET_LEN)]
    ShortSessionSecret,
    #[error("SESSION_SECRET is required in production")]
    MissingSessionSecret,
}

#[derive(Debug, Clone)]
pub struct EmsxConfig {
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub environment: String,
    pub log_level: String,
    pub session_timeout: Duration,
    pub dataset_path: Option<PathBuf>,
}

impl Default for EmsxConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_secret: String::new(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            session_timeout: Duration::from_secs(86400),
            dataset_path: None,
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed = value.trim().parse();
    parsed.map_err(|_| ConfigError::InvalidNumber { name, value })
}

impl EmsxConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            host: env::var("EMSX_HOST").unwrap_or(defaults.host),
            port: match env::var("EMSX_PORT") {
                Ok(value) => parse_number("EMSX_PORT", value)?,
                Err(_) => defaults.port,
            },
            session_secret: env::var("SESSION_SECRET").unwrap_or_default(),
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            session_timeout: match env::var("SESSION_TIMEOUT") {
                Ok(value) => Duration::from_secs(parse_number("SESSION_TIMEOUT", value)?),
                Err(_) => defaults.session_timeout,
            },
            dataset_path: env::var_os("EMSX_DATASET").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.is_empty() {
            if self.is_production() {
                return Err(ConfigError::MissingSessionSecret);
            }
        } else if self.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::ShortSessionSecret);
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn load_dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::load(self.dataset_path.as_deref())
    }
}

fn load_session_key(config: &EmsxConfig) -> Key {
    if config.session_secret.len() < MIN_SESSION_SECRET_LEN {
        // Shared by every worker so sessions survive across them.
        GENERATED_KEY
            .get_or_init(|| {
                warn!("⚠️  SESSION_SECRET not set, using generated key - NOT suitable for production!");
                Key::generate()
            })
            .clone()
    } else {
        Key::from(config.session_secret.as_bytes())
    }
}

pub fn get_emsx_session_middleware(config: &EmsxConfig) -> SessionMiddleware<CookieSessionStore> {
    let session_ttl = actix_web::cookie::time::Duration::seconds(config.session_timeout.as_secs() as i64);

    SessionMiddleware::builder(CookieSessionStore::default(), load_session_key(config))
        .cookie_name("emsx_session".to_string())
        .cookie_secure(config.is_production())
        .cookie_http_only(true)
        .cookie_same_site(if config.is_production() {
            SameSite::Strict
        } else {
            SameSite::Lax
        })
        .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
        .build()
}

pub fn setup_emsx_logging(config: &EmsxConfig) {
    LOGGING.get_or_init(|| {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(&config.log_level))
            .format_timestamp_millis()
            .try_init();
        info!("✅ EMSX logging initialized");
        info!("🔧 EMSX environment: {}", config.environment);
        debug!("🔍 EMSX debug logging active");
    });
}
