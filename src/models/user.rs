// emsx/src/models/user.rs
use serde::{Deserialize, Serialize};

use crate::models::role::Role;

/// The acting user. Built once per request from the session and passed
/// explicitly into every access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
}

/// A user as it arrives from an untyped boundary (config file, CLI flag,
/// foreign JSON). The role is still a free string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: String,
}

impl RawUser {
    /// `None` when the role is outside the known set; callers treat that as
    /// "sees nothing, may do nothing".
    pub fn resolve(&self) -> Option<User> {
        let role = self.role.parse::<Role>().ok()?;
        Some(User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role,
            avatar: initials(&self.name),
        })
    }
}

impl User {
    pub fn new(id: &str, name: &str, email: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            avatar: initials(name),
        }
    }
}

/// Fixed persona behind the role switcher. There is no credential check.
pub fn demo_user(role: Role) -> User {
    match role {
        Role::Admin => User::new("admin-001", "Admin User", "admin@company.com", role),
        Role::Hr => User::new("emp-008", "Lisa Anderson", "lisa.anderson@company.com", role),
        Role::Manager => User::new("emp-006", "John Smith", "john.smith@company.com", role),
        Role::Employee => User::new("emp-001", "Sarah Johnson", "sarah.johnson@company.com", role),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
