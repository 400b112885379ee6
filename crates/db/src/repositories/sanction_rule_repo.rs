//! Repository for the `sanction_rules` reference table.

use sqlx::PgPool;

use crate::models::sanction_rule::SanctionRuleRow;

/// Column list for sanction_rules queries.
const COLUMNS: &str = "id, category, min_absences, max_absences, item, price, created_at";

pub struct SanctionRuleRepo;

impl SanctionRuleRepo {
    /// Rules for the given categories, or every rule when `categories` is
    /// empty. Grouped by category, each group in insertion order, which is
    /// the order the evaluator tries them in.
    pub async fn list_by_categories(
        pool: &PgPool,
        categories: &[String],
    ) -> Result<Vec<SanctionRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sanction_rules
             WHERE cardinality($1::TEXT[]) = 0 OR category = ANY($1)
             ORDER BY category ASC, id ASC"
        );
        sqlx::query_as::<_, SanctionRuleRow>(&query)
            .bind(categories)
            .fetch_all(pool)
            .await
    }
}
