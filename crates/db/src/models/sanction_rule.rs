//! Sanction rule model (reference data, read-only at runtime).

use cetso_core::rules::SanctionRule;
use cetso_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sanction_rules` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SanctionRuleRow {
    pub id: DbId,
    pub category: String,
    pub min_absences: i32,
    pub max_absences: i32,
    pub item: String,
    pub price: f64,
    pub created_at: Timestamp,
}

impl From<SanctionRuleRow> for SanctionRule {
    fn from(row: SanctionRuleRow) -> Self {
        SanctionRule {
            category: row.category,
            min_absences: row.min_absences,
            max_absences: row.max_absences,
            item: row.item,
            price: row.price,
        }
    }
}
