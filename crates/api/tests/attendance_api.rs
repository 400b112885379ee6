//! Scan, log, and reset endpoint tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_student, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

use cetso_api::router::build_app_router;
use cetso_events::bus::{ATTENDANCE_RECORDED, ATTENDANCE_RESET};

#[sqlx::test(migrations = "../../db/migrations")]
async fn scan_records_attendance_and_publishes_event(pool: PgPool) {
    let (state, bus) = common::test_state(pool);
    let app = build_app_router(state);
    let mut rx = bus.subscribe();
    create_student(app.clone(), 2023001, "Juan", "Dela Cruz", "BSIT", "3rd Year").await;

    let response = post_json(
        app,
        "/api/v1/attendance/scan",
        json!({ "raw_id": "ID:2023-001\r\n", "session_type": "Intramurals AM_IN" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["student"]["student_id"], 2023001);
    assert_eq!(json["data"]["record"]["session_type"], "Intramurals AM_IN");
    assert_eq!(json["data"]["record"]["last_name"], "Dela Cruz");

    // student.created arrives first.
    let _ = rx.recv().await.unwrap();
    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, ATTENDANCE_RECORDED);
    assert_eq!(event.student_id, Some(2023001));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_scan_same_session_same_day_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_student(app.clone(), 42, "Ana", "Reyes", "BLIS", "1st Year").await;

    let body = json!({
        "raw_id": "42",
        "event_name": "Intramurals",
        "period": "AM",
        "direction": "IN",
    });
    let first = post_json(app.clone(), "/api/v1/attendance/scan", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app.clone(), "/api/v1/attendance/scan", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "DUPLICATE_SCAN");
    assert_eq!(json["student"]["first_name"], "Ana");

    let other_session = post_json(
        app.clone(),
        "/api/v1/attendance/scan",
        json!({ "raw_id": "42", "session_type": "Intramurals AM_OUT" }),
    )
    .await;
    assert_eq!(other_session.status(), StatusCode::CREATED);

    let log = body_json(get(app, "/api/v1/attendance?student_id=42").await).await;
    let rows = log["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["session_type"], "Intramurals AM_OUT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scan_rejections_map_to_status_codes(pool: PgPool) {
    let app = common::build_test_app(pool);

    let non_numeric = post_json(
        app.clone(),
        "/api/v1/attendance/scan",
        json!({ "raw_id": "abc", "session_type": "Intramurals AM_IN" }),
    )
    .await;
    assert_eq!(non_numeric.status(), StatusCode::BAD_REQUEST);

    let unknown = post_json(
        app.clone(),
        "/api/v1/attendance/scan",
        json!({ "raw_id": "999", "session_type": "Intramurals AM_IN" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(unknown).await["code"], "STUDENT_NOT_FOUND");

    let no_session = post_json(app, "/api/v1/attendance/scan", json!({ "raw_id": "999" })).await;
    assert_eq!(no_session.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_clears_log_and_publishes_event(pool: PgPool) {
    let (state, bus) = common::test_state(pool);
    let app = build_app_router(state);
    create_student(app.clone(), 1, "Juan", "Dela Cruz", "BSIT", "3rd Year").await;
    for session in ["Orientation AM_IN", "Orientation PM_IN"] {
        let response = post_json(
            app.clone(),
            "/api/v1/attendance/scan",
            json!({ "raw_id": "1", "session_type": session }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let mut rx = bus.subscribe();
    let response = delete(app.clone(), "/api/v1/attendance").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["removed"], 2);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, ATTENDANCE_RESET);

    let log = body_json(get(app, "/api/v1/attendance").await).await;
    assert!(log["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn program_log_view_and_dashboard_stats(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_student(app.clone(), 1, "Juan", "Dela Cruz", "BSIT", "3rd Year").await;
    create_student(app.clone(), 2, "Maria", "Santos", "BSCpE", "2nd Year").await;
    for id in ["1", "2"] {
        let response = post_json(
            app.clone(),
            "/api/v1/attendance/scan",
            json!({ "raw_id": id, "session_type": "Orientation AM_IN" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let log = body_json(get(app.clone(), "/api/v1/attendance?program=bscpe&limit=20").await).await;
    let rows = log["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student_id"], 2);

    let stats = body_json(get(app, "/api/v1/attendance/stats").await).await;
    assert_eq!(stats["data"]["total_students"], 2);
    assert_eq!(stats["data"]["total_logs"], 2);
    assert_eq!(stats["data"]["programs"][0]["program"], "BSIT");
    assert_eq!(stats["data"]["programs"][0]["logs"], 1);
}
