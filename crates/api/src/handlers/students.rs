//! Roster handlers: listing, lookup, additions, and explicit edits.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use cetso_core::error::CoreError;
use cetso_core::roster::{validate_student, Student};
use cetso_core::types::StudentId;
use cetso_db::models::student::{CreateStudent, StudentQuery, UpdateStudent};
use cetso_db::repositories::StudentRepo;
use cetso_events::LiveEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: StudentId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

/// GET /students?program=&year_level=&search=
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentQuery>,
) -> AppResult<impl IntoResponse> {
    let students = StudentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: student }))
}

/// POST /students
///
/// Adds a student. A taken ID surfaces as 409 through the unique constraint.
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let student = input.to_student();
    validate_student(&student)?;

    let row = StudentRepo::create(&state.pool, &student).await?;
    tracing::info!(student_id = row.student_id, program = %student.program, "Student created");
    state.event_bus.publish(LiveEvent::student_created(&student));

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /students/{id}
///
/// Past attendance rows keep the name and program they were logged with.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let current_row = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let current =
        Student::try_from(current_row).map_err(|e| AppError::InternalError(e.to_string()))?;

    let updated = input.apply_to(&current);
    validate_student(&updated)?;

    let row = StudentRepo::update(&state.pool, &updated)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(student_id = id, "Student updated");
    state.event_bus.publish(LiveEvent::student_updated(&updated));

    Ok(Json(DataResponse { data: row }))
}
