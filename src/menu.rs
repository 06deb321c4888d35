// emsx/src/menu.rs

use serde::{Serialize, Deserialize};

use crate::models::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub title: String,
    pub path: String,
    pub icon: Option<String>,
    pub order: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Navigation {
    pub primary: Vec<MenuItem>,
    pub secondary: Vec<MenuItem>,
}

struct NavEntry {
    title: &'static str,
    path: &'static str,
    icon: &'static str,
    roles: &'static [Role],
}

const EVERYONE: &[Role] = &[Role::Admin, Role::Hr, Role::Manager, Role::Employee];
const STAFF: &[Role] = &[Role::Admin, Role::Hr, Role::Manager];

// Checklist, Performance and Reports are sidebar-only links. They have no
// `Page` entry, so page access for them is always denied.
const PRIMARY: &[NavEntry] = &[
    NavEntry { title: "Dashboard", path: "/dashboard", icon: "layout-dashboard", roles: EVERYONE },
    NavEntry { title: "Employees", path: "/employees", icon: "users", roles: STAFF },
    NavEntry { title: "Projects", path: "/projects", icon: "folder-kanban", roles: STAFF },
    NavEntry { title: "Allocations", path: "/allocations", icon: "pie-chart", roles: STAFF },
    NavEntry { title: "Work Logs", path: "/work-logs", icon: "clock", roles: EVERYONE },
    NavEntry { title: "Checklist", path: "/checklist", icon: "clipboard-check", roles: EVERYONE },
    NavEntry { title: "Performance", path: "/ratings", icon: "star", roles: STAFF },
    NavEntry { title: "Skill Matching", path: "/skill-matching", icon: "sparkles", roles: STAFF },
    NavEntry { title: "Reports", path: "/reporting", icon: "bar-chart", roles: STAFF },
];

const SECONDARY: &[NavEntry] = &[
    NavEntry { title: "Profile", path: "/profile", icon: "user", roles: EVERYONE },
    NavEntry { title: "Settings", path: "/settings", icon: "settings", roles: EVERYONE },
];

fn visible_items(entries: &[NavEntry], role: Role) -> Vec<MenuItem> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.roles.contains(&role))
        .map(|(index, entry)| MenuItem {
            title: entry.title.to_string(),
            path: entry.path.to_string(),
            icon: Some(entry.icon.to_string()),
            order: Some(index),
        })
        .collect()
}

/// Sidebar entries for `role`, in display order.
pub fn navigation_for(role: Role) -> Navigation {
    Navigation {
        primary: visible_items(PRIMARY, role),
        secondary: visible_items(SECONDARY, role),
    }
}
