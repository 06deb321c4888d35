// emsx/src/models/work_log.rs
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WorkLogStatus {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
}

impl WorkLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLogStatus::InProgress => "In Progress",
            WorkLogStatus::Completed => "Completed",
            WorkLogStatus::Blocked => "Blocked",
        }
    }
}

/// A daily work report entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    pub date: NaiveDate,
    /// Wall-clock `HH:MM`.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub hours: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: WorkLogStatus,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}
