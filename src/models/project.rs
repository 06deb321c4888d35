// emsx/src/models/project.rs
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: u8,
    /// Owning manager.
    pub manager_id: String,
    #[serde(default)]
    pub manager_name: String,
    /// Employee ids assigned to the project.
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub spent: Option<u64>,
    #[serde(default)]
    pub client: Option<String>,
}

impl Project {
    pub fn has_member(&self, employee_id: &str) -> bool {
        self.team.iter().any(|member| member == employee_id)
    }
}

/// Share of an employee's time booked on one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAllocation {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub role: String,
    /// Percentage, 0..=100.
    #[serde(default)]
    pub allocation: u8,
    #[serde(default)]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub billable: bool,
}
