//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values and need neither
//! a server nor a database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use cetso_api::error::AppError;
use cetso_core::attendance::ScanError;
use cetso_core::error::CoreError;
use cetso_core::roster::{Program, Student, YearLevel};
use cetso_core::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn juan() -> Student {
    Student {
        student_id: 2023001,
        first_name: "Juan".into(),
        last_name: "Dela Cruz".into(),
        program: Program::Bsit,
        year_level: YearLevel::Third,
    }
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Student",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Student with id 42 not found");
}

#[tokio::test]
async fn core_validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("required_checks must not be negative".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "required_checks must not be negative");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("connection string with password".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn store_error_returns_503_without_driver_detail() {
    let err = AppError::Store(StoreError("pool timed out".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("pool timed out"));
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scan_validation_returns_400() {
    let err = AppError::Scan(ScanError::Validation("Invalid ID 'abc': numbers only".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid ID 'abc': numbers only");
}

#[tokio::test]
async fn scan_unknown_student_returns_404() {
    let (status, json) = error_to_response(AppError::Scan(ScanError::NotFound(99))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "STUDENT_NOT_FOUND");
    assert_eq!(json["error"], "ID 99 not found in roster");
}

#[tokio::test]
async fn duplicate_scan_returns_409_with_student() {
    let err = AppError::Scan(ScanError::Duplicate {
        student: juan(),
        session_type: "Intramurals AM_IN".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_SCAN");
    assert_eq!(
        json["error"],
        "Attendance already recorded for Intramurals AM_IN today"
    );
    assert_eq!(json["student"]["student_id"], 2023001);
    assert_eq!(json["student"]["last_name"], "Dela Cruz");
    assert_eq!(json["student"]["program"], "BSIT");
}

#[tokio::test]
async fn scan_persistence_failure_returns_503() {
    let err = AppError::Scan(ScanError::Persistence("connection reset".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn scan_error_converts_via_question_mark() {
    fn fails() -> Result<(), AppError> {
        Err(ScanError::NotFound(7))?
    }

    let (status, _) = error_to_response(fails().unwrap_err()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
