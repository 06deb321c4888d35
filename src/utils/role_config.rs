// emsx/src/utils/role_config.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::role::Role;

/// Dashboard page identifiers, as they appear in the first URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    Employees,
    Projects,
    Allocations,
    SkillMatching,
    Analytics,
    Profile,
    Settings,
    WorkLogs,
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Dashboard,
        Page::Employees,
        Page::Projects,
        Page::Allocations,
        Page::SkillMatching,
        Page::Analytics,
        Page::Profile,
        Page::Settings,
        Page::WorkLogs,
        Page::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Employees => "employees",
            Page::Projects => "projects",
            Page::Allocations => "allocations",
            Page::SkillMatching => "skill-matching",
            Page::Analytics => "analytics",
            Page::Profile => "profile",
            Page::Settings => "settings",
            Page::WorkLogs => "work-logs",
            Page::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

const STAFF_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::Employees,
    Page::Projects,
    Page::Allocations,
    Page::SkillMatching,
    Page::Analytics,
    Page::Profile,
    Page::Settings,
    Page::WorkLogs,
];

const EMPLOYEE_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::Employees,
    Page::Projects,
    Page::Analytics,
    Page::Profile,
    Page::Settings,
    Page::WorkLogs,
];

/// Pages a role may navigate to.
pub fn allowed_pages(role: Role) -> &'static [Page] {
    match role {
        Role::Admin | Role::Hr | Role::Manager => STAFF_PAGES,
        Role::Employee => EMPLOYEE_PAGES,
    }
}

pub fn can_access_page(role: Role, page: Page) -> bool {
    allowed_pages(role).contains(&page)
}

/// String form used at request boundaries. Unknown roles or pages are
/// denied.
pub fn can_access_page_str(role: &str, page: &str) -> bool {
    match (role.parse::<Role>(), page.parse::<Page>()) {
        (Ok(role), Ok(page)) => can_access_page(role, page),
        _ => false,
    }
}

fn registered_title(page: Page, role: Role) -> Option<&'static str> {
    let title = match (page, role) {
        (Page::Employees, Role::Admin) => "Employee Management",
        (Page::Employees, Role::Hr) => "Employee Directory",
        (Page::Employees, Role::Manager) => "My Team",
        (Page::Employees, Role::Employee) => "My Profile",

        (Page::Projects, Role::Admin) => "All Projects",
        (Page::Projects, Role::Hr) => "Projects Overview",
        (Page::Projects, Role::Manager) => "My Projects",
        (Page::Projects, Role::Employee) => "My Assignments",

        (Page::Reviews, Role::Admin | Role::Hr) => "Performance Reviews",
        (Page::Reviews, Role::Manager) => "Team Reviews",
        (Page::Reviews, Role::Employee) => "My Reviews",

        (Page::Dashboard, Role::Admin) => "System Dashboard",
        (Page::Dashboard, Role::Hr) => "HR Dashboard",
        (Page::Dashboard, Role::Manager) => "Team Dashboard",
        (Page::Dashboard, Role::Employee) => "My Dashboard",

        (Page::WorkLogs, Role::Admin | Role::Hr) => "Work Logs",
        (Page::WorkLogs, Role::Manager) => "Team Work Logs",
        (Page::WorkLogs, Role::Employee) => "My Work Logs",

        _ => return None,
    };
    Some(title)
}

/// Role-specific display label for `page`, or `page` itself when no label
/// is registered.
pub fn page_title(page: &str, role: Role) -> String {
    page.parse::<Page>()
        .ok()
        .and_then(|p| registered_title(p, role))
        .map(str::to_string)
        .unwrap_or_else(|| page.to_string())
}
