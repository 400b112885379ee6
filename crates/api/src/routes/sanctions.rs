//! Category, rule-table, and evaluation routes (merged at the `/api/v1` root).

use axum::routing::get;
use axum::Router;

use crate::handlers::sanctions;
use crate::state::AppState;

/// ```text
/// GET    /categories        -> list_categories
/// GET    /sanction-rules    -> list_rules (?category)
/// GET    /sanctions         -> list_sanctions (?category, required_checks, program, year_level, search)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(sanctions::list_categories))
        .route("/sanction-rules", get(sanctions::list_rules))
        .route("/sanctions", get(sanctions::list_sanctions))
}
