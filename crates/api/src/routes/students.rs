//! Mounted at `/students` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_students (?program, year_level, search)
/// POST   /          -> create_student
/// GET    /{id}      -> get_student
/// PUT    /{id}      -> update_student
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list_students).post(students::create_student))
        .route(
            "/{id}",
            get(students::get_student).put(students::update_student),
        )
}
