// emsx/src/filters.rs
use chrono::NaiveDate;

use crate::models::{
    employee::Employee,
    project::{Project, ProjectAllocation},
    review::PerformanceReview,
    work_log::WorkLog,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 25;
pub const MAX_PER_PAGE: u64 = 200;

/// Narrowing applied on top of a role-scoped view. Nothing here can widen
/// what the viewer already sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub employee_id: Option<String>,
    pub project_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            employee_id: None,
            project_id: None,
            date: None,
            from: None,
            to: None,
            status: None,
            search: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

pub fn parse_query(query: &str) -> ListQuery {
    let params: Vec<(&str, &str)> = querystring::querify(query);
    let mut options = ListQuery::default();

    for (key, value) in params {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key {
            "page" => options.page = value.parse().unwrap_or(DEFAULT_PAGE).max(1),
            "per_page" => options.per_page = value.parse().unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
            "employee_id" => options.employee_id = Some(value.to_string()),
            "project_id" => options.project_id = Some(value.to_string()),
            "date" => options.date = value.parse().ok(),
            "from" => options.from = value.parse().ok(),
            "to" => options.to = value.parse().ok(),
            "status" => options.status = Some(decode(value)),
            "search" => options.search = Some(decode(value).to_lowercase()),
            _ => {}
        }
    }

    options
}

// querify leaves values percent/plus-encoded.
fn decode(value: &str) -> String {
    serde_urlencoded::from_str::<Vec<(String, String)>>(&format!("v={value}"))
        .ok()
        .and_then(|mut pairs| pairs.pop())
        .map(|(_, v)| v)
        .unwrap_or_else(|| value.to_string())
}

impl ListQuery {
    fn matches_status(&self, status: &str) -> bool {
        self.status
            .as_deref()
            .map_or(true, |wanted| wanted.eq_ignore_ascii_case(status))
    }

    fn matches_search(&self, fields: &[&str]) -> bool {
        self.search
            .as_deref()
            .map_or(true, |needle| fields.iter().any(|f| f.to_lowercase().contains(needle)))
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        self.date.map_or(true, |d| d == date)
            && self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
    }

    fn matches_id(wanted: &Option<String>, actual: &str) -> bool {
        wanted.as_deref().map_or(true, |w| w == actual)
    }

    pub fn apply_employees<'a>(&self, items: Vec<&'a Employee>) -> Vec<&'a Employee> {
        items
            .into_iter()
            .filter(|e| Self::matches_id(&self.employee_id, &e.id))
            .filter(|e| self.matches_status(e.status.as_str()))
            .filter(|e| self.matches_search(&[&e.name, &e.email, &e.department, &e.designation]))
            .collect()
    }

    pub fn apply_projects<'a>(&self, items: Vec<&'a Project>) -> Vec<&'a Project> {
        items
            .into_iter()
            .filter(|p| Self::matches_id(&self.project_id, &p.id))
            .filter(|p| self.employee_id.as_deref().map_or(true, |id| p.has_member(id)))
            .filter(|p| self.matches_status(p.status.as_str()))
            .filter(|p| self.matches_search(&[&p.name, &p.description, p.client.as_deref().unwrap_or("")]))
            .collect()
    }

    pub fn apply_reviews<'a>(&self, items: Vec<&'a PerformanceReview>) -> Vec<&'a PerformanceReview> {
        items
            .into_iter()
            .filter(|r| Self::matches_id(&self.employee_id, &r.employee_id))
            .filter(|r| self.matches_status(r.status.as_str()))
            .filter(|r| self.matches_date(r.review_date))
            .filter(|r| self.matches_search(&[&r.employee_name, &r.reviewer_name, &r.review_period]))
            .collect()
    }

    pub fn apply_allocations<'a>(&self, items: Vec<&'a ProjectAllocation>) -> Vec<&'a ProjectAllocation> {
        items
            .into_iter()
            .filter(|a| Self::matches_id(&self.employee_id, &a.employee_id))
            .filter(|a| Self::matches_id(&self.project_id, &a.project_id))
            .filter(|a| self.matches_search(&[&a.employee_name, &a.project_name, &a.role]))
            .collect()
    }

    pub fn apply_work_logs<'a>(&self, items: Vec<&'a WorkLog>) -> Vec<&'a WorkLog> {
        items
            .into_iter()
            .filter(|l| Self::matches_id(&self.employee_id, &l.employee_id))
            .filter(|l| Self::matches_id(&self.project_id, &l.project_id))
            .filter(|l| self.matches_status(l.status.as_str()))
            .filter(|l| self.matches_date(l.date))
            .filter(|l| self.matches_search(&[&l.description, &l.employee_name, &l.project_name]))
            .collect()
    }

    /// Items before the requested page. Saturates for pages past any
    /// representable offset.
    pub fn skip(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.per_page);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{dataset::Dataset, role::Role, user::demo_user};
    use crate::utils::visibility::VisibleScope;

    #[test]
    fn test_parse_defaults() {
        let query = parse_query("");
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_parse_all_keys() {
        let query = parse_query(
            "page=3&per_page=10&employee_id=emp-001&project_id=proj-001&from=2026-01-01&to=2026-01-31&status=In+Progress&search=Mobile",
        );
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.skip(), 20);
        assert_eq!(query.employee_id.as_deref(), Some("emp-001"));
        assert_eq!(query.project_id.as_deref(), Some("proj-001"));
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(query.to, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(query.status.as_deref(), Some("In Progress"));
        assert_eq!(query.search.as_deref(), Some("mobile"));
    }

    #[test]
    fn test_parse_bad_numbers_fall_back() {
        let query = parse_query("page=0&per_page=100000&date=yesterday");
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);
        assert_eq!(query.date, None);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let query = parse_query("page=18446744073709551615&per_page=200");
        assert_eq!(query.page, u64::MAX);
        assert_eq!(query.skip(), usize::MAX);
    }

    #[test]
    fn test_query_never_widens_visibility() {
        let dataset = Dataset::embedded().unwrap();
        let user = demo_user(Role::Employee);
        let scope = VisibleScope::new(&dataset, Some(&user));
        let query = parse_query("employee_id=emp-002");
        assert!(query.apply_employees(scope.employees()).is_empty());
        assert!(query.apply_work_logs(scope.work_logs()).is_empty());
    }

    #[test]
    fn test_work_log_range_and_status() {
        let dataset = Dataset::embedded().unwrap();
        let user = demo_user(Role::Admin);
        let scope = VisibleScope::new(&dataset, Some(&user));

        let query = parse_query("from=2026-01-10&to=2026-01-11");
        let ids: Vec<&str> = query
            .apply_work_logs(scope.work_logs())
            .into_iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["log-003", "log-006", "log-009"]);

        let query = parse_query("status=blocked");
        assert_eq!(query.apply_work_logs(scope.work_logs()).len(), 1);
    }

    #[test]
    fn test_project_search_and_membership() {
        let dataset = Dataset::embedded().unwrap();
        let user = demo_user(Role::Hr);
        let scope = VisibleScope::new(&dataset, Some(&user));

        let query = parse_query("search=portal");
        let found = query.apply_projects(scope.projects());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "proj-004");

        let query = parse_query("employee_id=emp-004");
        let ids: Vec<&str> = query
            .apply_projects(scope.projects())
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["proj-004", "proj-006"]);
    }
}
