// emsx/src/utils/rbac.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    dataset::Dataset,
    employee::Employee,
    project::{Project, ProjectAllocation},
    review::PerformanceReview,
    role::Role,
    user::User,
    work_log::WorkLog,
};

/// Closed action vocabulary. Strings only appear at the edges
/// (`as_str` / `FromStr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "employee:create")]
    EmployeeCreate,
    #[serde(rename = "employee:edit")]
    EmployeeEdit,
    #[serde(rename = "employee:delete")]
    EmployeeDelete,
    #[serde(rename = "employee:view")]
    EmployeeView,
    #[serde(rename = "project:create")]
    ProjectCreate,
    #[serde(rename = "project:edit")]
    ProjectEdit,
    #[serde(rename = "project:delete")]
    ProjectDelete,
    #[serde(rename = "project:view")]
    ProjectView,
    #[serde(rename = "review:create")]
    ReviewCreate,
    #[serde(rename = "review:edit")]
    ReviewEdit,
    #[serde(rename = "review:view")]
    ReviewView,
    #[serde(rename = "reports:view")]
    ReportsView,
    #[serde(rename = "settings:system")]
    SettingsSystem,
    #[serde(rename = "settings:profile")]
    SettingsProfile,
    #[serde(rename = "allocation:view")]
    AllocationView,
    #[serde(rename = "worklog:create")]
    WorkLogCreate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl Action {
    pub const ALL: [Action; 16] = [
        Action::EmployeeCreate,
        Action::EmployeeEdit,
        Action::EmployeeDelete,
        Action::EmployeeView,
        Action::ProjectCreate,
        Action::ProjectEdit,
        Action::ProjectDelete,
        Action::ProjectView,
        Action::ReviewCreate,
        Action::ReviewEdit,
        Action::ReviewView,
        Action::ReportsView,
        Action::SettingsSystem,
        Action::SettingsProfile,
        Action::AllocationView,
        Action::WorkLogCreate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::EmployeeCreate => "employee:create",
            Action::EmployeeEdit => "employee:edit",
            Action::EmployeeDelete => "employee:delete",
            Action::EmployeeView => "employee:view",
            Action::ProjectCreate => "project:create",
            Action::ProjectEdit => "project:edit",
            Action::ProjectDelete => "project:delete",
            Action::ProjectView => "project:view",
            Action::ReviewCreate => "review:create",
            Action::ReviewEdit => "review:edit",
            Action::ReviewView => "review:view",
            Action::ReportsView => "reports:view",
            Action::SettingsSystem => "settings:system",
            Action::SettingsProfile => "settings:profile",
            Action::AllocationView => "allocation:view",
            Action::WorkLogCreate => "worklog:create",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// The record an action targets, when there is one.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Employee(&'a Employee),
    Project(&'a Project),
    Review(&'a PerformanceReview),
    Allocation(&'a ProjectAllocation),
    WorkLog(&'a WorkLog),
}

impl<'a> Resource<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Employee(_) => "employee",
            Resource::Project(_) => "project",
            Resource::Review(_) => "review",
            Resource::Allocation(_) => "allocation",
            Resource::WorkLog(_) => "worklog",
        }
    }

    fn manager_id(&self) -> Option<&'a str> {
        match self {
            Resource::Employee(e) => e.manager_id.as_deref(),
            Resource::Project(p) => Some(p.manager_id.as_str()),
            _ => None,
        }
    }

    fn email(&self) -> Option<&'a str> {
        match self {
            Resource::Employee(e) => Some(e.email.as_str()),
            _ => None,
        }
    }

    fn team(&self) -> Option<&'a [String]> {
        match self {
            Resource::Project(p) => Some(p.team.as_slice()),
            _ => None,
        }
    }

    fn reviewer_id(&self) -> Option<&'a str> {
        match self {
            Resource::Review(r) => Some(r.reviewer_id.as_str()),
            _ => None,
        }
    }

    fn employee_id(&self) -> Option<&'a str> {
        match self {
            Resource::Review(r) => Some(r.employee_id.as_str()),
            Resource::Allocation(a) => Some(a.employee_id.as_str()),
            Resource::WorkLog(l) => Some(l.employee_id.as_str()),
            _ => None,
        }
    }
}

fn managed_by(resource: Option<Resource<'_>>, user: &User) -> bool {
    resource.and_then(|r| r.manager_id()) == Some(user.id.as_str())
}

fn authored_by(resource: Option<Resource<'_>>, user: &User) -> bool {
    resource.and_then(|r| r.reviewer_id()) == Some(user.id.as_str())
}

fn concerns(resource: Option<Resource<'_>>, user: &User) -> bool {
    resource.and_then(|r| r.employee_id()) == Some(user.id.as_str())
}

fn is_own_record(resource: Option<Resource<'_>>, user: &User) -> bool {
    resource.and_then(|r| r.email()) == Some(user.email.as_str())
}

fn on_team(resource: Option<Resource<'_>>, user: &User) -> bool {
    resource
        .and_then(|r| r.team())
        .is_some_and(|team| team.iter().any(|member| *member == user.id))
}

/// Whether `user` may perform `action`, optionally on `resource`.
///
/// Admins may do anything. Ownership-based rules deny when no resource is
/// supplied or when the resource does not carry the field being compared.
pub fn has_permission(user: &User, action: Action, resource: Option<Resource<'_>>) -> bool {
    let role = user.role;
    if role == Role::Admin {
        return true;
    }

    match action {
        Action::EmployeeCreate | Action::EmployeeDelete => role == Role::Hr,
        Action::ProjectCreate | Action::ProjectDelete => false,

        Action::EmployeeEdit | Action::ProjectEdit => match role {
            Role::Hr => true,
            Role::Manager => managed_by(resource, user),
            Role::Admin | Role::Employee => false,
        },
        Action::ReviewEdit => match role {
            Role::Hr => true,
            Role::Manager => authored_by(resource, user),
            Role::Admin | Role::Employee => false,
        },

        Action::EmployeeView => match role {
            Role::Hr => true,
            Role::Manager => managed_by(resource, user),
            Role::Employee => is_own_record(resource, user),
            Role::Admin => true,
        },
        Action::ProjectView => match role {
            Role::Hr => true,
            Role::Manager => managed_by(resource, user),
            Role::Employee => on_team(resource, user),
            Role::Admin => true,
        },
        Action::ReviewView => match role {
            Role::Hr => true,
            Role::Manager => authored_by(resource, user),
            Role::Employee => concerns(resource, user),
            Role::Admin => true,
        },

        Action::ReviewCreate => matches!(role, Role::Hr | Role::Manager),
        Action::ReportsView | Action::AllocationView => role != Role::Employee,
        Action::SettingsSystem => false,
        Action::SettingsProfile => true,

        Action::WorkLogCreate => match role {
            Role::Hr => true,
            Role::Manager | Role::Employee => concerns(resource, user),
            Role::Admin => true,
        },
    }
}

/// String-action form used where actions arrive untyped. The admin check
/// runs before the action is parsed; an unrecognised action is denied.
pub fn check_action(user: &User, action: &str, resource: Option<Resource<'_>>) -> bool {
    if user.role == Role::Admin {
        return true;
    }
    match action.parse::<Action>() {
        Ok(action) => {
            let allowed = has_permission(user, action, resource);
            log::debug!(
                "access {} for {} ({}) on {} [{}]",
                if allowed { "granted" } else { "denied" },
                user.id,
                user.role,
                action,
                resource.map(|r| r.kind()).unwrap_or("-"),
            );
            allowed
        }
        Err(unknown) => {
            log::debug!("{} requested by {}; denying", unknown, user.id);
            false
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResourceLookupError {
    #[error("resource reference {0:?} must look like kind:id")]
    Malformed(String),
    #[error("unknown resource kind {0:?}")]
    UnknownKind(String),
    #[error("no {kind} with id {id:?}")]
    NotFound { kind: &'static str, id: String },
}

/// Looks up a `kind:id` reference such as `project:proj-001`.
pub fn resolve_resource<'a>(dataset: &'a Dataset, reference: &str) -> Result<Resource<'a>, ResourceLookupError> {
    let (kind, id) = reference
        .split_once(':')
        .filter(|(kind, id)| !kind.is_empty() && !id.is_empty())
        .ok_or_else(|| ResourceLookupError::Malformed(reference.to_string()))?;

    let (kind, found) = match kind.trim().to_lowercase().as_str() {
        "employee" => ("employee", dataset.employee(id).map(Resource::Employee)),
        "project" => ("project", dataset.project(id).map(Resource::Project)),
        "review" => ("review", dataset.review(id).map(Resource::Review)),
        "allocation" => ("allocation", dataset.allocation(id).map(Resource::Allocation)),
        "worklog" | "work-log" => ("worklog", dataset.work_log(id).map(Resource::WorkLog)),
        other => return Err(ResourceLookupError::UnknownKind(other.to_string())),
    };

    found.ok_or_else(|| ResourceLookupError::NotFound {
        kind,
        id: id.to_string(),
    })
}
