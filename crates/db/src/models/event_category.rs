//! Event category model.

use cetso_core::rules::EventCategory;
use cetso_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventCategoryRow {
    pub id: DbId,
    pub name: String,
    pub required_checks: i32,
    pub created_at: Timestamp,
}

impl From<EventCategoryRow> for EventCategory {
    fn from(row: EventCategoryRow) -> Self {
        EventCategory {
            name: row.name,
            required_checks: row.required_checks,
        }
    }
}
