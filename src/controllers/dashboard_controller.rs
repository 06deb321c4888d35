// emsx/src/controllers/dashboard_controller.rs

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;

use crate::error::EmsxError;
use crate::menu::navigation_for;
use crate::models::{dataset::Dataset, role::Role};
use crate::utils::{
    auth::extract_user_from_session,
    role_config::{can_access_page_str, page_title},
    structs::PageAccess,
    visibility::VisibleScope,
};

#[derive(Debug, Serialize)]
pub struct VisibleCounts {
    pub employees: usize,
    pub projects: usize,
    pub reviews: usize,
    pub allocations: usize,
    pub work_logs: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub title: String,
    pub role: Role,
    pub employee_id: Option<String>,
    pub counts: VisibleCounts,
}

/// GET /emsx/dashboard - What the acting user can see, counted
pub async fn dashboard_overview(
    session: Session,
    dataset: web::Data<Dataset>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let scope = VisibleScope::new(&dataset, Some(&user));

    let overview = DashboardOverview {
        title: page_title("dashboard", user.role),
        role: user.role,
        employee_id: scope.employee_id().map(str::to_string),
        counts: VisibleCounts {
            employees: scope.employees().len(),
            projects: scope.projects().len(),
            reviews: scope.reviews().len(),
            allocations: scope.allocations().len(),
            work_logs: scope.work_logs().len(),
        },
    };
    info!("📊 Dashboard accessed by: {}", user.email);

    Ok(HttpResponse::Ok().json(overview))
}

/// GET /emsx/navigation - Sidebar for the acting role
pub async fn navigation(session: Session) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    Ok(HttpResponse::Ok().json(navigation_for(user.role)))
}

/// GET /emsx/pages/{page} - Whether the acting role may open a page, and
/// what it is called for them
pub async fn page_access(
    session: Session,
    page: web::Path<String>,
) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    let page = page.into_inner();

    Ok(HttpResponse::Ok().json(PageAccess {
        allowed: can_access_page_str(user.role.as_str(), &page),
        title: page_title(&page, user.role),
        page,
    }))
}
