// emsx/src/controllers/auth_controller.rs
use actix_session::Session;
use actix_web::{web, HttpResponse};
use tracing::{info, warn};

use crate::error::EmsxError;
use crate::models::role::Role;
use crate::utils::auth::{extract_user_from_session, store_role_in_session, user_from_session};
use crate::utils::structs::{ApiResponse, SwitchRoleForm};

/// POST /emsx/session/role - Switch the acting role
pub async fn switch_role(
    session: Session,
    form: web::Json<SwitchRoleForm>,
) -> Result<HttpResponse, EmsxError> {
    let role = form.role.parse::<Role>().map_err(|e| {
        warn!("🚫 Rejected role switch: {}", e);
        EmsxError::BadRequest(e.to_string())
    })?;

    let user = store_role_in_session(&session, role)?;
    info!("🔄 Now acting as {} ({})", user.email, role);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        user,
        format!("Switched to {} view", role),
    )))
}

/// POST /emsx/session/logout - Forget the acting role
pub async fn logout(session: Session) -> HttpResponse {
    let who = user_from_session(&session)
        .map(|u| u.email)
        .unwrap_or_else(|| "anonymous".to_string());
    session.purge();
    info!("👋 Session cleared for {}", who);

    HttpResponse::Ok().json(ApiResponse::success_with_message((), "Logged out".to_string()))
}

/// GET /emsx/session - The acting user
pub async fn session_status(session: Session) -> Result<HttpResponse, EmsxError> {
    let user = extract_user_from_session(&session)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}
