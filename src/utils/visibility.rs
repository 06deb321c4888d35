// emsx/src/utils/visibility.rs
//! Role-scoped views over the dashboard collections.
//!
//! Every filter takes the full collection and the acting [`User`] and
//! returns the visible subsequence, in input order, borrowing from the
//! input. Filters never fail: a missing employee id yields an empty view.

use std::collections::HashSet;

use crate::models::{
    dataset::Dataset,
    employee::Employee,
    project::{Project, ProjectAllocation},
    review::PerformanceReview,
    role::Role,
    user::User,
    work_log::WorkLog,
};

/// Id of the employee record that belongs to `user`, matched by email.
pub fn resolve_employee_id<'a>(employees: &'a [Employee], user: &User) -> Option<&'a str> {
    employees
        .iter()
        .find(|e| e.email == user.email)
        .map(|e| e.id.as_str())
}

/// Admin/HR: everyone. Manager: direct reports plus their own record.
/// Employee: their own record only.
pub fn filter_employees<'a>(employees: &'a [Employee], user: &User) -> Vec<&'a Employee> {
    match user.role {
        Role::Admin | Role::Hr => employees.iter().collect(),
        Role::Manager => employees
            .iter()
            .filter(|e| e.reports_to(&user.id) || e.email == user.email)
            .collect(),
        Role::Employee => employees.iter().filter(|e| e.email == user.email).collect(),
    }
}

/// Admin/HR: all. Manager: projects they own. Employee: projects whose team
/// includes `employee_id`.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    user: &User,
    employee_id: Option<&str>,
) -> Vec<&'a Project> {
    match user.role {
        Role::Admin | Role::Hr => projects.iter().collect(),
        Role::Manager => projects.iter().filter(|p| p.manager_id == user.id).collect(),
        Role::Employee => match employee_id {
            Some(id) => projects.iter().filter(|p| p.has_member(id)).collect(),
            None => Vec::new(),
        },
    }
}

/// Admin/HR: all. Manager: reviews they authored (not reviews of their
/// reports written by someone else). Employee: reviews about `employee_id`.
pub fn filter_reviews<'a>(
    reviews: &'a [PerformanceReview],
    user: &User,
    employee_id: Option<&str>,
) -> Vec<&'a PerformanceReview> {
    match user.role {
        Role::Admin | Role::Hr => reviews.iter().collect(),
        Role::Manager => reviews.iter().filter(|r| r.reviewer_id == user.id).collect(),
        Role::Employee => match employee_id {
            Some(id) => reviews.iter().filter(|r| r.employee_id == id).collect(),
            None => Vec::new(),
        },
    }
}

/// Manager: logs written by anyone in their employee view.
pub fn filter_work_logs<'a>(
    logs: &'a [WorkLog],
    employees: &[Employee],
    user: &User,
    employee_id: Option<&str>,
) -> Vec<&'a WorkLog> {
    match user.role {
        Role::Admin | Role::Hr => logs.iter().collect(),
        Role::Manager => {
            let team: HashSet<&str> = filter_employees(employees, user)
                .into_iter()
                .map(|e| e.id.as_str())
                .collect();
            logs.iter().filter(|l| team.contains(l.employee_id.as_str())).collect()
        }
        Role::Employee => match employee_id {
            Some(id) => logs.iter().filter(|l| l.employee_id == id).collect(),
            None => Vec::new(),
        },
    }
}

/// Manager: allocations on the projects they own.
pub fn filter_allocations<'a>(
    allocations: &'a [ProjectAllocation],
    projects: &[Project],
    user: &User,
    employee_id: Option<&str>,
) -> Vec<&'a ProjectAllocation> {
    match user.role {
        Role::Admin | Role::Hr => allocations.iter().collect(),
        Role::Manager => {
            let owned: HashSet<&str> = filter_projects(projects, user, employee_id)
                .into_iter()
                .map(|p| p.id.as_str())
                .collect();
            allocations.iter().filter(|a| owned.contains(a.project_id.as_str())).collect()
        }
        Role::Employee => match employee_id {
            Some(id) => allocations.iter().filter(|a| a.employee_id == id).collect(),
            None => Vec::new(),
        },
    }
}

/// A dataset seen through one (optional) user. With no user, every view is
/// empty.
#[derive(Debug, Clone, Copy)]
pub struct VisibleScope<'a> {
    dataset: &'a Dataset,
    user: Option<&'a User>,
    employee_id: Option<&'a str>,
}

impl<'a> VisibleScope<'a> {
    pub fn new(dataset: &'a Dataset, user: Option<&'a User>) -> Self {
        let employee_id = user.and_then(|u| resolve_employee_id(&dataset.employees, u));
        Self {
            dataset,
            user,
            employee_id,
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        self.user
    }

    pub fn employee_id(&self) -> Option<&'a str> {
        self.employee_id
    }

    pub fn employees(&self) -> Vec<&'a Employee> {
        self.user
            .map(|u| filter_employees(&self.dataset.employees, u))
            .unwrap_or_default()
    }

    pub fn projects(&self) -> Vec<&'a Project> {
        self.user
            .map(|u| filter_projects(&self.dataset.projects, u, self.employee_id))
            .unwrap_or_default()
    }

    pub fn reviews(&self) -> Vec<&'a PerformanceReview> {
        self.user
            .map(|u| filter_reviews(&self.dataset.reviews, u, self.employee_id))
            .unwrap_or_default()
    }

    pub fn work_logs(&self) -> Vec<&'a WorkLog> {
        self.user
            .map(|u| filter_work_logs(&self.dataset.work_logs, &self.dataset.employees, u, self.employee_id))
            .unwrap_or_default()
    }

    pub fn allocations(&self) -> Vec<&'a ProjectAllocation> {
        self.user
            .map(|u| filter_allocations(&self.dataset.allocations, &self.dataset.projects, u, self.employee_id))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{demo_user, RawUser};

    fn employee(id: &str, manager_id: &str, email: &str) -> Employee {
        Employee {
            id: id.into(),
            manager_id: Some(manager_id.into()),
            email: email.into(),
            ..Default::default()
        }
    }

    fn scenario() -> Vec<Employee> {
        vec![employee("e1", "m1", "e1@x.com"), employee("e2", "m2", "e2@x.com")]
    }

    trait Keyed {
        fn key(&self) -> &str;
    }

    impl Keyed for Employee {
        fn key(&self) -> &str {
            &self.id
        }
    }

    impl Keyed for Project {
        fn key(&self) -> &str {
            &self.id
        }
    }

    impl Keyed for PerformanceReview {
        fn key(&self) -> &str {
            &self.id
        }
    }

    impl Keyed for WorkLog {
        fn key(&self) -> &str {
            &self.id
        }
    }

    impl Keyed for ProjectAllocation {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn ids<T: Keyed>(items: &[&T]) -> Vec<String> {
        items.iter().map(|item| item.key().to_string()).collect()
    }

    fn seed() -> Dataset {
        Dataset::embedded().unwrap()
    }

    #[test]
    fn test_manager_sees_direct_reports_only() {
        let employees = scenario();
        let user = User::new("m1", "Max", "m1@x.com", Role::Manager);
        let visible = filter_employees(&employees, &user);
        assert_eq!(ids(&visible), vec!["e1"]);
    }

    #[test]
    fn test_employee_sees_only_self() {
        let employees = scenario();
        let user = User::new("u2", "Eve", "e2@x.com", Role::Employee);
        let visible = filter_employees(&employees, &user);
        assert_eq!(ids(&visible), vec!["e2"]);
    }

    #[test]
    fn test_admin_and_hr_see_everyone_in_order() {
        let employees = seed().employees;
        for role in [Role::Admin, Role::Hr] {
            let visible = filter_employees(&employees, &demo_user(role));
            assert_eq!(visible.len(), employees.len());
            assert!(visible.iter().zip(&employees).all(|(a, b)| *a == b));
        }
    }

    #[test]
    fn test_empty_collections_stay_empty_for_every_role() {
        for role in Role::ALL {
            let user = demo_user(role);
            assert!(filter_employees(&[], &user).is_empty());
            assert!(filter_projects(&[], &user, Some("emp-001")).is_empty());
            assert!(filter_reviews(&[], &user, Some("emp-001")).is_empty());
            assert!(filter_work_logs(&[], &[], &user, Some("emp-001")).is_empty());
            assert!(filter_allocations(&[], &[], &user, Some("emp-001")).is_empty());
        }
    }

    #[test]
    fn test_employee_filters_are_subsets_and_respect_role_rules() {
        let dataset = seed();
        for role in Role::ALL {
            let user = demo_user(role);
            let visible = filter_employees(&dataset.employees, &user);
            assert!(visible.iter().all(|v| dataset.employees.iter().any(|e| e == *v)));
            match role {
                Role::Admin | Role::Hr => assert_eq!(visible.len(), dataset.employees.len()),
                Role::Manager => assert!(visible
                    .iter()
                    .all(|e| e.reports_to(&user.id) || e.email == user.email)),
                Role::Employee => {
                    assert!(visible.len() <= 1);
                    assert!(visible.iter().all(|e| e.email == user.email));
                }
            }
        }
    }

    #[test]
    fn test_manager_employee_view_includes_self_and_reports() {
        let dataset = seed();
        let visible = filter_employees(&dataset.employees, &demo_user(Role::Manager));
        assert_eq!(
            ids(&visible),
            vec!["emp-001", "emp-002", "emp-003", "emp-006"]
        );
    }

    #[test]
    fn test_filters_are_idempotent() {
        let dataset = seed();
        for role in Role::ALL {
            let scope = VisibleScope::new(&dataset, None);
            assert!(scope.employees().is_empty());
            let user = demo_user(role);
            let scope = VisibleScope::new(&dataset, Some(&user));
            assert_eq!(scope.employees(), scope.employees());
            assert_eq!(scope.projects(), scope.projects());
            assert_eq!(scope.reviews(), scope.reviews());
            assert_eq!(scope.work_logs(), scope.work_logs());
            assert_eq!(scope.allocations(), scope.allocations());
        }
    }

    #[test]
    fn test_manager_projects_are_owned_projects() {
        let dataset = seed();
        let user = demo_user(Role::Manager);
        let visible = filter_projects(&dataset.projects, &user, None);
        assert_eq!(ids(&visible), vec!["proj-001", "proj-003", "proj-005"]);
    }

    #[test]
    fn test_employee_projects_need_resolved_id() {
        let dataset = seed();
        let user = demo_user(Role::Employee);
        assert!(filter_projects(&dataset.projects, &user, None).is_empty());

        let employee_id = resolve_employee_id(&dataset.employees, &user);
        assert_eq!(employee_id, Some("emp-001"));
        let visible = filter_projects(&dataset.projects, &user, employee_id);
        assert_eq!(ids(&visible), vec!["proj-001", "proj-002", "proj-006"]);
    }

    #[test]
    fn test_manager_reviews_are_authored_reviews_only() {
        let dataset = seed();
        let user = demo_user(Role::Manager);
        let visible = filter_reviews(&dataset.reviews, &user, None);
        assert_eq!(
            ids(&visible),
            vec!["review-001", "review-002", "review-003"]
        );
        // review-008 is about a direct report but written by another manager.
        assert!(visible.iter().all(|r| r.id != "review-008"));
    }

    #[test]
    fn test_employee_reviews_are_about_them() {
        let dataset = seed();
        let user = demo_user(Role::Employee);
        assert!(filter_reviews(&dataset.reviews, &user, None).is_empty());
        let visible = filter_reviews(&dataset.reviews, &user, Some("emp-001"));
        assert_eq!(ids(&visible), vec!["review-001", "review-008"]);
    }

    #[test]
    fn test_work_logs_follow_team_membership() {
        let dataset = seed();
        let manager = demo_user(Role::Manager);
        let visible = filter_work_logs(&dataset.work_logs, &dataset.employees, &manager, None);
        assert!(visible
            .iter()
            .all(|l| ["emp-001", "emp-002", "emp-003", "emp-006"].contains(&l.employee_id.as_str())));
        assert_eq!(visible.len(), 5);

        let employee = demo_user(Role::Employee);
        let own = filter_work_logs(&dataset.work_logs, &dataset.employees, &employee, Some("emp-001"));
        assert_eq!(ids(&own), vec!["log-001", "log-002", "log-003"]);
        assert!(filter_work_logs(&dataset.work_logs, &dataset.employees, &employee, None).is_empty());
    }

    #[test]
    fn test_allocations_follow_project_ownership() {
        let dataset = seed();
        let manager = demo_user(Role::Manager);
        let visible = filter_allocations(&dataset.allocations, &dataset.projects, &manager, None);
        assert!(visible
            .iter()
            .all(|a| ["proj-001", "proj-003", "proj-005"].contains(&a.project_id.as_str())));
        assert_eq!(visible.len(), 5);

        let employee = demo_user(Role::Employee);
        let own = filter_allocations(&dataset.allocations, &dataset.projects, &employee, Some("emp-001"));
        assert_eq!(ids(&own), vec!["alloc-001", "alloc-004"]);
    }

    #[test]
    fn test_unknown_role_sees_nothing() {
        let dataset = seed();
        let raw = RawUser {
            id: "admin-001".into(),
            name: "Admin User".into(),
            email: "admin@company.com".into(),
            role: "root".into(),
        };
        let user = raw.resolve();
        let scope = VisibleScope::new(&dataset, user.as_ref());
        assert!(scope.user().is_none());
        assert!(scope.employees().is_empty());
        assert!(scope.projects().is_empty());
        assert!(scope.reviews().is_empty());
        assert!(scope.work_logs().is_empty());
        assert!(scope.allocations().is_empty());
    }

    #[test]
    fn test_scope_resolves_employee_id() {
        let dataset = seed();
        let user = demo_user(Role::Employee);
        let scope = VisibleScope::new(&dataset, Some(&user));
        assert_eq!(scope.employee_id(), Some("emp-001"));
        assert_eq!(scope.employees().len(), 1);
        assert_eq!(scope.projects().len(), 3);
    }
}
