// emsx/src/router.rs
use actix_web::{web, Scope};
use tracing::info;

use crate::controllers::{
    auth_controller::{logout, session_status, switch_role},
    dashboard_controller::{dashboard_overview, navigation, page_access},
    resource_controller::{
        check_permission, export_employees, export_work_logs, form_schema, list_allocations,
        list_employees, list_projects, list_reviews, list_work_logs, work_log_summary,
    },
};
use crate::health::health_check;
use crate::utils::{role_config::Page, structs::PageGuard};

/// Every EMSX endpoint under `/emsx`. Expects `web::Data<Dataset>` and the
/// session middleware to be registered on the app.
pub fn register_all_emsx_routes() -> Scope {
    info!("🔧 Starting EMSX route registration...");

    let scope = web::scope("/emsx")
        .route("/health", web::get().to(health_check))
        // ===========================
        // SESSION ROUTES
        // ===========================
        .service(
            web::scope("/session")
                .route("", web::get().to(session_status))
                .route("/role", web::post().to(switch_role))
                .route("/logout", web::post().to(logout)),
        )
        // ===========================
        // DASHBOARD ROUTES
        // ===========================
        .route("/dashboard", web::get().to(dashboard_overview))
        .route("/navigation", web::get().to(navigation))
        .route("/pages/{page}", web::get().to(page_access))
        // ===========================
        // DATA ROUTES
        // ===========================
        .route("/employees", web::get().to(list_employees))
        .route("/employees/export", web::get().to(export_employees))
        .route("/projects", web::get().to(list_projects))
        .route("/reviews", web::get().to(list_reviews))
        .service(
            web::scope("/allocations")
                .wrap(PageGuard::new(Page::Allocations))
                .route("", web::get().to(list_allocations)),
        )
        .route("/work-logs", web::get().to(list_work_logs))
        .route("/work-logs/export", web::get().to(export_work_logs))
        .route("/work-logs/summary", web::get().to(work_log_summary))
        // ===========================
        // ACCESS ROUTES
        // ===========================
        .route("/permissions/{action}", web::get().to(check_permission))
        .route("/forms/{entity}", web::get().to(form_schema));

    info!("🎉 EMSX route registration completed!");
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::Dataset;
    use actix_session::{storage::CookieSessionStore, SessionMiddleware};
    use actix_web::{
        cookie::{Cookie, Key},
        http::StatusCode,
        test, App,
    };
    use serde_json::{json, Value};

    macro_rules! emsx_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Dataset::embedded().unwrap()))
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_secure(false)
                            .build(),
                    )
                    .service(register_all_emsx_routes()),
            )
            .await
        };
    }

    macro_rules! login {
        ($app:expr, $role:expr) => {{
            let req = test::TestRequest::post()
                .uri("/emsx/session/role")
                .set_json(json!({ "role": $role }))
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "login as {}", $role);
            resp.response().cookies().next().unwrap().into_owned()
        }};
    }

    macro_rules! status_of {
        ($app:expr, $uri:expr, $cookie:expr) => {{
            let mut req = test::TestRequest::get().uri($uri);
            let cookie: Option<&Cookie<'static>> = $cookie;
            if let Some(cookie) = cookie {
                req = req.cookie(cookie.clone());
            }
            match test::try_call_service($app, req.to_request()).await {
                Ok(resp) => resp.status(),
                Err(err) => err.as_response_error().status_code(),
            }
        }};
    }

    fn ids(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect()
    }

    #[actix_rt::test]
    async fn test_health_reports_dataset() {
        let app = emsx_app!();
        let req = test::TestRequest::get().uri("/emsx/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "emsx");
        assert_eq!(body["dataset"]["employees"], 10);
    }

    #[actix_rt::test]
    async fn test_unknown_role_is_rejected() {
        let app = emsx_app!();
        for role in ["superuser", "ADMIN", " manager", "Employee"] {
            let req = test::TestRequest::post()
                .uri("/emsx/session/role")
                .set_json(json!({ "role": role }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{role:?}");
        }
    }

    #[actix_rt::test]
    async fn test_requests_without_a_role_are_unauthorized() {
        let app = emsx_app!();
        for uri in ["/emsx/session", "/emsx/employees", "/emsx/allocations", "/emsx/dashboard"] {
            assert_eq!(status_of!(&app, uri, None), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[actix_rt::test]
    async fn test_session_remembers_role() {
        let app = emsx_app!();
        let cookie = login!(&app, "hr");
        let req = test::TestRequest::get().uri("/emsx/session").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["role"], "hr");
        assert_eq!(body["data"]["email"], "lisa.anderson@company.com");
    }

    #[actix_rt::test]
    async fn test_manager_sees_team_and_self() {
        let app = emsx_app!();
        let cookie = login!(&app, "manager");
        let req = test::TestRequest::get().uri("/emsx/employees").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec!["emp-001", "emp-002", "emp-003", "emp-006"]);
        assert_eq!(body["total"], 4);
    }

    #[actix_rt::test]
    async fn test_employee_sees_own_reviews_and_paginates() {
        let app = emsx_app!();
        let cookie = login!(&app, "employee");

        let req = test::TestRequest::get().uri("/emsx/reviews").cookie(cookie.clone()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().iter().all(|r| r["employeeId"] == "emp-001"));

        let req = test::TestRequest::get()
            .uri("/emsx/projects?per_page=1&page=2")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["page"], 2);
        assert_eq!(body["total"], 3);
        assert_eq!(ids(&body), vec!["proj-002"]);
    }

    #[actix_rt::test]
    async fn test_huge_page_number_returns_empty_page() {
        let app = emsx_app!();
        let cookie = login!(&app, "admin");
        let req = test::TestRequest::get()
            .uri("/emsx/employees?page=18446744073709551615")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], 10);
    }

    #[actix_rt::test]
    async fn test_allocations_page_guard() {
        let app = emsx_app!();
        let employee = login!(&app, "employee");
        assert_eq!(status_of!(&app, "/emsx/allocations", Some(&employee)), StatusCode::FORBIDDEN);

        let manager = login!(&app, "manager");
        assert_eq!(status_of!(&app, "/emsx/allocations", Some(&manager)), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_page_access_and_titles() {
        let app = emsx_app!();
        let cookie = login!(&app, "employee");

        let req = test::TestRequest::get().uri("/emsx/pages/projects").cookie(cookie.clone()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "page": "projects", "allowed": true, "title": "My Assignments" }));

        let req = test::TestRequest::get().uri("/emsx/pages/allocations").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["allowed"], false);
    }

    #[actix_rt::test]
    async fn test_permission_endpoint() {
        let app = emsx_app!();
        let cookie = login!(&app, "manager");

        let req = test::TestRequest::get()
            .uri("/emsx/permissions/project:edit?resource=project:proj-001")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["allowed"], true);

        let req = test::TestRequest::get()
            .uri("/emsx/permissions/project:edit?resource=project:proj-002")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["allowed"], false);

        let req = test::TestRequest::get()
            .uri("/emsx/permissions/payroll:run")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["allowed"], false);

        assert_eq!(
            status_of!(&app, "/emsx/permissions/project:view?resource=project:nope", Some(&cookie)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of!(&app, "/emsx/permissions/project:view?resource=nope", Some(&cookie)),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_forms_follow_create_permissions() {
        let app = emsx_app!();
        let employee = login!(&app, "employee");
        assert_eq!(status_of!(&app, "/emsx/forms/work-log", Some(&employee)), StatusCode::OK);
        assert_eq!(status_of!(&app, "/emsx/forms/employee", Some(&employee)), StatusCode::FORBIDDEN);
        assert_eq!(status_of!(&app, "/emsx/forms/payroll", Some(&employee)), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_work_log_summary_and_export() {
        let app = emsx_app!();
        let cookie = login!(&app, "admin");

        let req = test::TestRequest::get()
            .uri("/emsx/work-logs/summary?date=2026-01-12")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["entries"], 7);

        let req = test::TestRequest::get()
            .uri("/emsx/work-logs/export")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(String::from_utf8_lossy(&body).lines().count(), 11);
    }

    #[actix_rt::test]
    async fn test_logout_clears_role() {
        let app = emsx_app!();
        let cookie = login!(&app, "admin");
        let req = test::TestRequest::post()
            .uri("/emsx/session/logout")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp.response().cookies().next().unwrap().into_owned();
        assert_eq!(status_of!(&app, "/emsx/session", Some(&cleared)), StatusCode::UNAUTHORIZED);
    }
}
