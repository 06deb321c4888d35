// emsx/src/helpers/downloads/csv_download.rs
use actix_web::HttpResponse;
use chrono::Utc;
use tracing::info;

use crate::models::{employee::Employee, work_log::WorkLog};

const EMPLOYEE_HEADERS: &[&str] = &[
    "id", "code", "name", "email", "designation", "department", "manager", "status", "join_date", "location",
];

const WORK_LOG_HEADERS: &[&str] = &[
    "id", "date", "employee", "project", "start", "end", "hours", "status", "description",
];

/// Visible employees as CSV, one row per record, header first.
pub fn employees_csv(employees: &[&Employee]) -> String {
    let mut csv_content = EMPLOYEE_HEADERS.join(",") + "\n";
    for employee in employees {
        let row = [
            escape_csv_field(&employee.id),
            escape_csv_field(&employee.code),
            escape_csv_field(&employee.name),
            escape_csv_field(&employee.email),
            escape_csv_field(&employee.designation),
            escape_csv_field(&employee.department),
            escape_csv_field(employee.manager_name.as_deref().unwrap_or("")),
            escape_csv_field(employee.status.as_str()),
            employee.join_date.format("%Y-%m-%d").to_string(),
            escape_csv_field(&employee.location),
        ];
        csv_content.push_str(&(row.join(",") + "\n"));
    }
    csv_content
}

pub fn work_logs_csv(logs: &[&WorkLog]) -> String {
    let mut csv_content = WORK_LOG_HEADERS.join(",") + "\n";
    for log in logs {
        let row = [
            escape_csv_field(&log.id),
            log.date.format("%Y-%m-%d").to_string(),
            escape_csv_field(&log.employee_name),
            escape_csv_field(&log.project_name),
            escape_csv_field(&log.start_time),
            escape_csv_field(&log.end_time),
            log.hours.to_string(),
            escape_csv_field(log.status.as_str()),
            escape_csv_field(&log.description),
        ];
        csv_content.push_str(&(row.join(",") + "\n"));
    }
    csv_content
}

pub fn csv_response(resource_name: &str, csv_content: String, record_count: usize) -> HttpResponse {
    let filename = format!("{}_{}.csv", resource_name, Utc::now().format("%Y%m%d_%H%M%S"));
    info!("✅ Exported {} {} records as CSV", record_count, resource_name);

    HttpResponse::Ok()
        .content_type("text/csv")
        .append_header(("Content-Disposition", format!("attachment; filename=\"{}\"", filename)))
        .body(csv_content)
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("Hyderabad, India"), "\"Hyderabad, India\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_employees_csv_rows() {
        let employee = Employee {
            id: "emp-001".into(),
            name: "Sarah Johnson".into(),
            email: "sarah.johnson@company.com".into(),
            location: "Hyderabad, India".into(),
            manager_name: Some("John Smith".into()),
            ..Default::default()
        };
        let csv = employees_csv(&[&employee]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], EMPLOYEE_HEADERS.join(","));
        assert!(lines[1].starts_with("emp-001,,Sarah Johnson,sarah.johnson@company.com"));
        assert!(lines[1].ends_with("\"Hyderabad, India\""));
        assert!(lines[1].contains("John Smith,Active"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(work_logs_csv(&[]), WORK_LOG_HEADERS.join(",") + "\n");
    }
}
