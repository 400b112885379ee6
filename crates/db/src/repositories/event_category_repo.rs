//! Repository for the `event_categories` table.

use sqlx::PgPool;

use crate::models::event_category::EventCategoryRow;

/// Column list for event_categories queries.
const COLUMNS: &str = "id, name, required_checks, created_at";

pub struct EventCategoryRepo;

impl EventCategoryRepo {
    /// List all categories, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<EventCategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_categories ORDER BY name ASC");
        sqlx::query_as::<_, EventCategoryRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a category by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<EventCategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_categories WHERE name = $1");
        sqlx::query_as::<_, EventCategoryRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
