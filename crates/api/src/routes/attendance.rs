//! Mounted at `/attendance` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_attendance (?student_id, program, limit, offset)
/// DELETE /          -> reset_attendance
/// POST   /scan      -> scan
/// GET    /stats     -> attendance_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(attendance::list_attendance).delete(attendance::reset_attendance),
        )
        .route("/scan", post(attendance::scan))
        .route("/stats", get(attendance::attendance_stats))
}
