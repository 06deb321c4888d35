// emsx/src/health.rs
use actix_web::{web, HttpResponse, Responder};

use crate::models::dataset::Dataset;
use crate::{NAME, VERSION};

pub async fn health_check(dataset: web::Data<Dataset>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "name": NAME,
        "version": VERSION,
        "dataset": {
            "employees": dataset.employees.len(),
            "projects": dataset.projects.len(),
            "allocations": dataset.allocations.len(),
            "reviews": dataset.reviews.len(),
            "workLogs": dataset.work_logs.len(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
