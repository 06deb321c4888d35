// emsx/src/models/dataset.rs
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    employee::Employee,
    project::{Project, ProjectAllocation},
    review::PerformanceReview,
    work_log::WorkLog,
};

pub const SEED_FILE: &str = "seed.json";

#[derive(RustEmbed)]
#[folder = "data/"]
struct SeedAssets;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("embedded dataset {0} is missing")]
    MissingEmbed(&'static str),
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset has {} dangling reference(s): {}", .0.len(), .0.join("; "))]
    DanglingReferences(Vec<String>),
}

/// Read-only collections the dashboard works over. Access checks borrow
/// from it and never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub allocations: Vec<ProjectAllocation>,
    #[serde(default)]
    pub reviews: Vec<PerformanceReview>,
    #[serde(default)]
    pub work_logs: Vec<WorkLog>,
}

impl Dataset {
    /// The seed shipped inside the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        let file = SeedAssets::get(SEED_FILE).ok_or(DatasetError::MissingEmbed(SEED_FILE))?;
        let dataset: Dataset = serde_json::from_slice(&file.data)?;
        info!("📦 Loaded embedded dataset ({} employees, {} projects)", dataset.employees.len(), dataset.projects.len());
        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset = serde_json::from_slice(&raw)?;
        info!("📦 Loaded dataset from {}", path.display());
        Ok(dataset)
    }

    /// Dataset from `path` when given, the embedded seed otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn review(&self, id: &str) -> Option<&PerformanceReview> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn allocation(&self, id: &str) -> Option<&ProjectAllocation> {
        self.allocations.iter().find(|a| a.id == id)
    }

    pub fn work_log(&self, id: &str) -> Option<&WorkLog> {
        self.work_logs.iter().find(|l| l.id == id)
    }

    /// Checks that every id-based relationship points at an existing
    /// employee or project.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let employee_ids: HashSet<&str> = self.employees.iter().map(|e| e.id.as_str()).collect();
        let project_ids: HashSet<&str> = self.projects.iter().map(|p| p.id.as_str()).collect();
        let mut problems = Vec::new();

        let mut emails = HashSet::new();
        for employee in &self.employees {
            if !emails.insert(employee.email.as_str()) {
                problems.push(format!("employee {} has duplicate email {}", employee.id, employee.email));
            }
            if let Some(manager_id) = &employee.manager_id {
                if !employee_ids.contains(manager_id.as_str()) {
                    problems.push(format!("employee {} -> unknown manager {}", employee.id, manager_id));
                }
            }
        }

        for project in &self.projects {
            if !employee_ids.contains(project.manager_id.as_str()) {
                problems.push(format!("project {} -> unknown manager {}", project.id, project.manager_id));
            }
            for member in &project.team {
                if !employee_ids.contains(member.as_str()) {
                    problems.push(format!("project {} -> unknown team member {}", project.id, member));
                }
            }
        }

        for review in &self.reviews {
            if !employee_ids.contains(review.employee_id.as_str()) {
                problems.push(format!("review {} -> unknown subject {}", review.id, review.employee_id));
            }
            if !employee_ids.contains(review.reviewer_id.as_str()) {
                problems.push(format!("review {} -> unknown reviewer {}", review.id, review.reviewer_id));
            }
        }

        for allocation in &self.allocations {
            if !employee_ids.contains(allocation.employee_id.as_str()) {
                problems.push(format!("allocation {} -> unknown employee {}", allocation.id, allocation.employee_id));
            }
            if !project_ids.contains(allocation.project_id.as_str()) {
                problems.push(format!("allocation {} -> unknown project {}", allocation.id, allocation.project_id));
            }
        }

        for log in &self.work_logs {
            if !employee_ids.contains(log.employee_id.as_str()) {
                problems.push(format!("work log {} -> unknown employee {}", log.id, log.employee_id));
            }
            if !project_ids.contains(log.project_id.as_str()) {
                problems.push(format!("work log {} -> unknown project {}", log.id, log.project_id));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            for problem in &problems {
                warn!("⚠️  {}", problem);
            }
            Err(DatasetError::DanglingReferences(problems))
        }
    }
}
