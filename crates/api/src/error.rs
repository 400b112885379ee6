use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cetso_core::attendance::ScanError;
use cetso_core::error::CoreError;
use cetso_core::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cetso_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected or failed attendance scan.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The store behind the core trait failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body failed `validator` checks.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Scan(scan) => return scan_error_response(scan),

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            AppError::Store(err) => persistence(&err.0),
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InvalidInput(errs) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", errs.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Scan outcomes map one-to-one onto status codes. A duplicate also carries
/// the matched student.
fn scan_error_response(err: &ScanError) -> Response {
    let message = err.to_string();
    let (status, body) = match err {
        ScanError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": message, "code": "VALIDATION_ERROR" }),
        ),
        ScanError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            json!({ "error": message, "code": "STUDENT_NOT_FOUND" }),
        ),
        ScanError::Duplicate { student, .. } => (
            StatusCode::CONFLICT,
            json!({ "error": message, "code": "DUPLICATE_SCAN", "student": student }),
        ),
        ScanError::Persistence(detail) => {
            let (status, code, message) = persistence(detail);
            (status, json!({ "error": message, "code": code }))
        }
    };
    (status, axum::Json(body)).into_response()
}

fn persistence(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Persistence failure");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "PERSISTENCE_ERROR",
        "The attendance store is unavailable, please retry".to_string(),
    )
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
