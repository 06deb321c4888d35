// emsx/src/models/employee.rs
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EmploymentStatus {
    #[default]
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Inactive,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "Active",
            EmploymentStatus::OnLeave => "On Leave",
            EmploymentStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full Time")]
    FullTime,
    Intern,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Skill {
    pub name: String,
    pub proficiency: Proficiency,
}

/// An employee record. `manager_id` is the only key used for reporting
/// lines; `manager_name` is display-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub join_date: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: EmploymentStatus,
    #[serde(default, rename = "type")]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub utilization: u8,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Employee {
    pub fn reports_to(&self, manager_id: &str) -> bool {
        self.manager_id.as_deref() == Some(manager_id)
    }
}
