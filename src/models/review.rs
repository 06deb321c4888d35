// emsx/src/models/review.rs
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ReviewStatus {
    #[default]
    Draft,
    Submitted,
    Completed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Draft => "Draft",
            ReviewStatus::Submitted => "Submitted",
            ReviewStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewRatings {
    pub technical: u8,
    pub communication: u8,
    pub teamwork: u8,
    pub initiative: u8,
    pub leadership: u8,
}

/// One review has exactly one subject (`employee_id`) and one author
/// (`reviewer_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    pub reviewer_id: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub review_period: String,
    #[serde(default)]
    pub review_date: NaiveDate,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub overall_rating: f32,
    #[serde(default)]
    pub ratings: ReviewRatings,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub comments: String,
}
