// emsx/src/utils/structs.rs
use serde::{Deserialize, Serialize};

use crate::utils::role_config::Page;

#[derive(Debug, Serialize, Deserialize)]
pub struct SwitchRoleForm {
    pub role: String,
}

/// Wraps a scope so only roles allowed on `page` get through.
#[derive(Debug, Clone, Copy)]
pub struct PageGuard {
    pub page: Page,
}

impl PageGuard {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PageAccess {
    pub page: String,
    pub allowed: bool,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PermissionAnswer {
    pub action: String,
    pub resource: Option<String>,
    pub allowed: bool,
}
