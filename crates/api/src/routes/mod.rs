pub mod attendance;
pub mod health;
pub mod sanctions;
pub mod students;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                     list (?program, year_level, search), create
/// /students/{id}                get, update
///
/// /attendance                   list (?student_id, program, limit, offset), reset (DELETE)
/// /attendance/scan              record one scan (POST)
/// /attendance/stats             per-program student and log counts
///
/// /categories                   event categories with required checks
/// /sanction-rules               rule table (?category) with conflict report
/// /sanctions                    evaluate (?category, required_checks, program,
///                               year_level, search)
///
/// /live                         server-sent events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", students::router())
        .nest("/attendance", attendance::router())
        .merge(sanctions::router())
        .route("/live", get(handlers::live::live_events))
}
