//! Attendance handlers: scanning, the log listing, and the administrative reset.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use cetso_core::attendance::{AttendanceRecord, ScanError};
use cetso_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use cetso_core::roster::{Program, Student};
use cetso_core::session::{session_type, Direction, Period};
use cetso_core::store::AttendanceStore;
use cetso_core::types::StudentId;
use cetso_db::models::attendance::AttendanceQuery;
use cetso_db::models::ProgramCountRow;
use cetso_db::repositories::{AttendanceRepo, StudentRepo};
use cetso_events::LiveEvent;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /attendance/scan`.
///
/// The session is either given verbatim in `session_type` or composed from
/// `event_name`, `period` and `direction`.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub raw_id: String,
    pub session_type: Option<String>,
    pub event_name: Option<String>,
    pub period: Option<Period>,
    pub direction: Option<Direction>,
}

impl ScanRequest {
    /// The session tag this scan is for.
    pub fn resolve_session_type(&self) -> Result<String, ScanError> {
        if let Some(tag) = &self.session_type {
            return Ok(tag.clone());
        }
        match (&self.event_name, self.period, self.direction) {
            (Some(event), Some(period), Some(direction)) if !event.trim().is_empty() => {
                Ok(session_type(event, period, direction))
            }
            _ => Err(ScanError::Validation(
                "Provide session_type, or event_name with period and direction".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub message: String,
    pub student: Student,
    pub record: AttendanceRecord,
}

/// Query parameters for `GET /attendance`.
#[derive(Debug, Deserialize)]
pub struct AttendanceListParams {
    pub student_id: Option<StudentId>,
    pub program: Option<Program>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Dashboard totals for `GET /attendance/stats`.
#[derive(Debug, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total_students: i64,
    pub total_logs: i64,
    pub programs: Vec<ProgramStats>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ProgramStats {
    pub program: Program,
    pub students: i64,
    pub logs: i64,
}

impl AttendanceStats {
    /// Fold per-program counts into one row per known program. Programs with
    /// no rows report zero.
    pub fn from_counts(students: &[ProgramCountRow], logs: &[ProgramCountRow]) -> Self {
        let count_for = |rows: &[ProgramCountRow], program: Program| {
            rows.iter()
                .filter(|r| r.program == program.code())
                .map(|r| r.count)
                .sum::<i64>()
        };

        Self {
            total_students: students.iter().map(|r| r.count).sum(),
            total_logs: logs.iter().map(|r| r.count).sum(),
            programs: Program::ALL
                .into_iter()
                .map(|program| ProgramStats {
                    program,
                    students: count_for(students, program),
                    logs: count_for(logs, program),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub removed: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /attendance/scan
///
/// Runs the recorder against the database and, on success, pushes
/// `attendance.recorded` to live subscribers.
pub async fn scan(
    State(state): State<AppState>,
    Json(input): Json<ScanRequest>,
) -> AppResult<impl IntoResponse> {
    let session = input.resolve_session_type()?;

    let outcome = state
        .recorder
        .record(&state.store(), &input.raw_id, &session, Utc::now())
        .await?;

    state
        .event_bus
        .publish(LiveEvent::attendance_recorded(&outcome.record));

    let response = ScanResponse {
        message: outcome.message(),
        student: outcome.student,
        record: outcome.record,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /attendance?student_id=&program=&limit=&offset=
///
/// The log, newest first. `program=BSIT&limit=20` is the per-program
/// recent-activity view.
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let filter = AttendanceQuery {
        student_id: params.student_id,
        program: params.program,
    };

    let rows = AttendanceRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /attendance/stats
pub async fn attendance_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let students = StudentRepo::count_by_program(&state.pool).await?;
    let logs = AttendanceRepo::count_by_program(&state.pool).await?;

    Ok(Json(DataResponse {
        data: AttendanceStats::from_counts(&students, &logs),
    }))
}

/// DELETE /attendance
///
/// Administrative bulk reset of the whole log.
pub async fn reset_attendance(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let removed = state.store().clear_records().await?;
    tracing::warn!(removed, "Attendance log cleared");
    state.event_bus.publish(LiveEvent::attendance_reset(removed));

    Ok(Json(DataResponse {
        data: ResetResponse { removed },
    }))
}
