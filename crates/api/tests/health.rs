//! Integration tests for the health endpoint and general HTTP behaviour.
//!
//! Only `health_check_returns_ok_with_json` talks to Postgres; the rest run on
//! a lazy pool that is never connected.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

use cetso_api::config::ServerConfig;
use cetso_api::router::build_app_router;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/api/v1/nothing-here").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_degraded_when_database_is_down() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["live_subscribers"], 0);
}

#[tokio::test]
async fn cors_exposes_request_id_and_skips_bad_origins() {
    let (mut state, _) = common::test_state(common::unreachable_pool());
    state.config = Arc::new(ServerConfig {
        cors_origins: vec!["not a\norigin".to_string(), "http://localhost:5173".to_string()],
        ..common::test_config()
    });
    let app = build_app_router(state);

    let request = Request::builder()
        .uri("/api/v1/nothing-here")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(headers["access-control-expose-headers"]
        .to_str()
        .unwrap()
        .contains("x-request-id"));
    assert!(!headers.contains_key("access-control-allow-credentials"));
}
