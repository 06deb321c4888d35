// emsx/src/utils/auth.rs
//! Session plumbing for the role switcher. The session only remembers a
//! role name; the acting user is rebuilt from it on every request.

use actix_session::Session;
use tracing::warn;

use crate::error::EmsxError;
use crate::models::{
    role::Role,
    user::{demo_user, User},
};

pub const SESSION_ROLE_KEY: &str = "role";

pub fn store_role_in_session(session: &Session, role: Role) -> Result<User, EmsxError> {
    session.renew();
    session
        .insert(SESSION_ROLE_KEY, role.as_str())
        .map_err(|e| {
            warn!("failed to persist role in session: {}", e);
            EmsxError::InternalError
        })?;
    Ok(demo_user(role))
}

/// The acting user, or `None` when no (known) role is stored.
pub fn user_from_session(session: &Session) -> Option<User> {
    let raw = session.get::<String>(SESSION_ROLE_KEY).ok().flatten()?;
    match raw.parse::<Role>() {
        Ok(role) => Some(demo_user(role)),
        Err(e) => {
            warn!("🔐 ignoring session with {}", e);
            None
        }
    }
}

pub fn extract_user_from_session(session: &Session) -> Result<User, EmsxError> {
    user_from_session(session).ok_or(EmsxError::Unauthorized)
}
