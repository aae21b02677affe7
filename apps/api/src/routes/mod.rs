pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::alerts::handlers as alerts;
use crate::auth::handlers as auth;
use crate::companies::handlers as companies;
use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Upper bound for multipart resume uploads.
const RESUME_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/logout", post(auth::handle_logout))
        .route("/api/auth/me", get(auth::handle_me))
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        .route("/api/jobs/:id/apply", post(jobs::handle_apply))
        .route("/api/jobs/:id/save", post(jobs::handle_save_job))
        .route("/api/admin/jobs/:id", delete(jobs::handle_admin_delete_job))
        // Resumes
        .route(
            "/api/resume/upload",
            post(resumes::handle_upload).layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT)),
        )
        .route("/api/resume", get(resumes::handle_get_resume))
        .route("/api/resume/matches", get(resumes::handle_matches))
        .route("/api/resume/feedback/:job_id", get(resumes::handle_feedback))
        // Alerts
        .route("/api/alerts/subscribe", post(alerts::handle_subscribe))
        // Dashboards
        .route(
            "/api/dashboard/candidate",
            get(dashboard::handle_candidate_dashboard),
        )
        .route(
            "/api/dashboard/employer",
            get(dashboard::handle_employer_dashboard),
        )
        .route("/api/dashboard/admin", get(dashboard::handle_admin_dashboard))
        // Companies
        .route("/api/companies/:id", get(companies::handle_get_company))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::token::TokenSigner;
    use crate::config::Config;
    use crate::mailer::DisabledMailer;
    use crate::matching::SkillVocabulary;

    const SECRET: &str = "router-test-secret-0123456789";

    // The pool never connects; these requests are answered before any query.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/rolerocket_test".to_string(),
            auth_secret: SECRET.to_string(),
            app_base_url: "http://localhost:3000".to_string(),
            cookie_secure: false,
            seed_jobs: false,
            storage: None,
            mail: None,
            admin: None,
            port: 0,
            rust_log: "info".to_string(),
        };
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AppState {
            db,
            storage: None,
            mailer: Arc::new(DisabledMailer),
            tokens: Arc::new(TokenSigner::new(SECRET)),
            vocabulary: Arc::new(SkillVocabulary::baseline()),
            config,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "rolerocket-api");
    }

    #[tokio::test]
    async fn test_protected_route_without_token_is_unauthorized() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/dashboard/candidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_forged_cookie_is_unauthorized() {
        let forged = TokenSigner::new("some-other-secret-0123456789").issue(
            uuid::Uuid::new_v4(),
            crate::models::user::Role::Admin,
            chrono::Utc::now().timestamp(),
        );
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/auth/me")
                    .header(header::COOKIE, format!("rr_token={forged}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cookie.starts_with("rr_token="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_invalid_registration_is_rejected_before_storage() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name":"A","email":"nope","password":"short","role":"candidate"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    async fn assert_validation_envelope(request: Request<Body>) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        assert_validation_envelope(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    }

    #[tokio::test]
    async fn test_missing_json_fields_use_error_envelope() {
        assert_validation_envelope(
            Request::post("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"ada@example.com"}"#))
                .unwrap(),
        )
        .await;
    }

    #[tokio::test]
    async fn test_bad_query_uses_error_envelope() {
        assert_validation_envelope(
            Request::get("/api/jobs?page=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    }

    #[tokio::test]
    async fn test_non_uuid_path_uses_error_envelope() {
        assert_validation_envelope(
            Request::get("/api/jobs/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_validation_envelope(
            Request::get("/api/companies/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    }
}
