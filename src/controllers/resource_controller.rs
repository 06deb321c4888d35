// emsx/src/controllers/resource_controller.rs
use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::EmsxError;
use crate::filters::parse_query;
use crate::helpers::downloads::csv_download::{csv_response, employees_csv, work_logs_csv};
use crate::models::{dataset::Dataset, user::User};
use crate::pagination::PaginatedResponse;
use crate::schemas::form_schema::{form_structure_for, FormEntity};
use crate::utils::{
    auth::extract_user_from_session,
    rbac::{check_action, resolve_resource, ResourceLookupError},
    stats::WorkLogSummary,
    structs::PermissionAnswer,
    visibility::VisibleScope,
};

#[derive(Debug, Deserialize)]
pub struct PermissionQuery {
    pub resource: Option<String>,
}

/// GET /emsx/employees
pub async fn list_employees(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_employees(VisibleScope::new(&dataset, Some(&user)).employees());

    info!("📋 {} employees visible to {}", items.len(), user.email);
    Ok(HttpResponse::Ok().json(PaginatedResponse::paginate(items, &query)))
}

/// GET /emsx/employees/export
pub async fn export_employees(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_employees(VisibleScope::new(&dataset, Some(&user)).employees());

    Ok(csv_response("employees", employees_csv(&items), items.len()))
}

/// GET /emsx/projects
pub async fn list_projects(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_projects(VisibleScope::new(&dataset, Some(&user)).projects());

    Ok(HttpResponse::Ok().json(PaginatedResponse::paginate(items, &query)))
}

/// GET /emsx/reviews
pub async fn list_reviews(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_reviews(VisibleScope::new(&dataset, Some(&user)).reviews());

    Ok(HttpResponse::Ok().json(PaginatedResponse::paginate(items, &query)))
}

/// GET /emsx/allocations - behind the allocations page guard, which has
/// already put the acting user in the request extensions
pub async fn list_allocations(
    req: HttpRequest,
    user: web::ReqData<User>,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = user.into_inner();
    let query = parse_query(req.query_string());
    let items = query.apply_allocations(VisibleScope::new(&dataset, Some(&user)).allocations());

    Ok(HttpResponse::Ok().json(PaginatedResponse::paginate(items, &query)))
}

/// GET /emsx/work-logs
pub async fn list_work_logs(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_work_logs(VisibleScope::new(&dataset, Some(&user)).work_logs());

    Ok(HttpResponse::Ok().json(PaginatedResponse::paginate(items, &query)))
}

/// GET /emsx/work-logs/export
pub async fn export_work_logs(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let items = query.apply_work_logs(VisibleScope::new(&dataset, Some(&user)).work_logs());

    Ok(csv_response("work_logs", work_logs_csv(&items), items.len()))
}

/// GET /emsx/work-logs/summary?date=YYYY-MM-DD - defaults to today
pub async fn work_log_summary(
    req: HttpRequest,
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let query = parse_query(req.query_string());
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let logs = VisibleScope::new(&dataset, Some(&user)).work_logs();

    Ok(HttpResponse::Ok().json(WorkLogSummary::for_date(logs, date)))
}

/// GET /emsx/permissions/{action}?resource=kind:id
pub async fn check_permission(
    session: Session,
    dataset: web::Data<Dataset>,
    action: web::Path<String>,
    query: web::Query<PermissionQuery>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let action = action.into_inner();
    let reference = query.into_inner().resource;

    let resource = match reference.as_deref() {
        Some(reference) => Some(resolve_resource(&dataset, reference).map_err(|e| {
            warn!("⚠️ Permission check on bad resource: {}", e);
            match e {
                ResourceLookupError::NotFound { .. } => EmsxError::NotFound,
                other => EmsxError::BadRequest(other.to_string()),
            }
        })?),
        None => None,
    };

    let allowed = check_action(&user, &action, resource);
    Ok(HttpResponse::Ok().json(PermissionAnswer {
        action,
        resource: reference,
        allowed,
    }))
}

/// GET /emsx/forms/{entity} - Create dialog layout, only for roles that may
/// create the entity
pub async fn form_schema(
    session: Session,
    entity: web::Path<String>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let entity: FormEntity = entity.parse().map_err(|_| EmsxError::NotFound)?;

    if !entity.creatable_by(&user) {
        warn!("🚫 {} ({}) may not create {}", user.email, user.role, entity.title());
        return Err(EmsxError::Forbidden(format!("cannot create {}", entity.title())));
    }

    Ok(HttpResponse::Ok().json(form_structure_for(entity)))
}
