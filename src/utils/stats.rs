// emsx/src/utils/stats.rs
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::work_log::{WorkLog, WorkLogStatus};

/// Day totals shown on the work-log page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkLogSummary {
    pub date: NaiveDate,
    pub entries: usize,
    pub total_hours: f32,
    pub active_projects: usize,
    pub in_progress: usize,
}

impl WorkLogSummary {
    /// Summarises the logs dated `date`; callers pass an already-filtered set.
    pub fn for_date<'a, I>(logs: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a WorkLog>,
    {
        let day: Vec<&WorkLog> = logs.into_iter().filter(|log| log.date == date).collect();
        let projects: HashSet<&str> = day.iter().map(|log| log.project_id.as_str()).collect();

        Self {
            date,
            entries: day.len(),
            total_hours: day.iter().map(|log| log.hours).sum(),
            active_projects: projects.len(),
            in_progress: day
                .iter()
                .filter(|log| log.status == WorkLogStatus::InProgress)
                .count(),
        }
    }
}
