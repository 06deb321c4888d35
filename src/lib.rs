// emsx/src/lib.rs

pub mod configs;
pub mod controllers;
pub mod error;
pub mod filters;
pub mod health;
pub mod helpers;
pub mod menu;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod router;
pub mod schemas;
pub mod utils;

// Export configuration and app setup functions
pub use configs::initializer::{get_emsx_session_middleware, setup_emsx_logging, ConfigError, EmsxConfig};

// Export the access-control core
pub use models::{
    dataset::{Dataset, DatasetError},
    role::Role,
    user::{demo_user, RawUser, User},
};
pub use utils::{
    rbac::{check_action, has_permission, resolve_resource, Action, Resource},
    role_config::{allowed_pages, can_access_page, can_access_page_str, page_title, Page, UnknownPage},
    visibility::{
        filter_allocations, filter_employees, filter_projects, filter_reviews, filter_work_logs,
        resolve_employee_id, VisibleScope,
    },
};

pub use error::EmsxError;
pub use menu::navigation_for;

// Export router for custom integration
pub use router::register_all_emsx_routes;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub mod prelude {
    pub use crate::{
        can_access_page, check_action, has_permission, page_title, register_all_emsx_routes, Action,
        Dataset, EmsxConfig, Page, Resource, Role, User, VisibleScope,
    };
}
