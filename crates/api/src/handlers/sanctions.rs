//! Sanction handlers: event categories, the rule table, and evaluation.
//!
//! Evaluation is recomputed from the full roster and log on every request;
//! nothing is cached between calls.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use cetso_core::error::CoreError;
use cetso_core::roster::{Program, YearLevel};
use cetso_core::rules::{
    validate_rule_table, EventCategory, RuleConflict, SanctionRule, CATEGORY_INTRAMURALS,
};
use cetso_core::sanction::{evaluate, summarize, SanctionResult, SanctionSummary};
use cetso_core::sanction_filter::SanctionFilter;
use cetso_core::store::AttendanceStore;
use cetso_db::models::sanction_rule::SanctionRuleRow;
use cetso_db::repositories::{EventCategoryRepo, SanctionRuleRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /sanction-rules`.
#[derive(Debug, Deserialize)]
pub struct RuleListParams {
    /// Comma-separated category names; absent or empty means all.
    pub category: Option<String>,
}

/// Query parameters for `GET /sanctions`.
#[derive(Debug, Deserialize)]
pub struct SanctionParams {
    pub category: Option<String>,
    /// Overrides the category's configured requirement.
    pub required_checks: Option<i32>,
    pub program: Option<Program>,
    pub year_level: Option<YearLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RuleTableResponse {
    pub rules: Vec<SanctionRuleRow>,
    /// Empty when every absence count maps to at most one rule.
    pub conflicts: Vec<RuleConflict>,
}

#[derive(Debug, Serialize)]
pub struct SanctionReport {
    pub category: String,
    pub required_checks: i32,
    pub summary: SanctionSummary,
    pub results: Vec<SanctionResult>,
}

fn parse_categories(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories: Vec<EventCategory> = EventCategoryRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(EventCategory::from)
        .collect();
    Ok(Json(DataResponse { data: categories }))
}

/// GET /sanction-rules?category=Intramurals,Orientation
pub async fn list_rules(
    State(state): State<AppState>,
    Query(params): Query<RuleListParams>,
) -> AppResult<impl IntoResponse> {
    let categories = parse_categories(params.category.as_deref());
    let rows = SanctionRuleRepo::list_by_categories(&state.pool, &categories).await?;

    let rules: Vec<SanctionRule> = rows.iter().cloned().map(SanctionRule::from).collect();
    let conflicts = validate_rule_table(&rules);

    Ok(Json(DataResponse {
        data: RuleTableResponse {
            rules: rows,
            conflicts,
        },
    }))
}

/// GET /sanctions?category=&required_checks=&program=&year_level=&search=
///
/// Evaluates every student for one category, then narrows the result with
/// the program/year/search filter. `category` defaults to Intramurals.
pub async fn list_sanctions(
    State(state): State<AppState>,
    Query(params): Query<SanctionParams>,
) -> AppResult<impl IntoResponse> {
    let category_name = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(CATEGORY_INTRAMURALS)
        .to_string();

    let category = EventCategoryRepo::find_by_name(&state.pool, &category_name)
        .await?
        .map(EventCategory::from)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown event category '{category_name}'"
            )))
        })?;
    let required_checks = params.required_checks.unwrap_or(category.required_checks);

    let store = state.store();
    let students = store.list_students().await?;
    let log = store.list_records().await?;
    let rules = store.list_rules(std::slice::from_ref(&category.name)).await?;

    let conflicts = validate_rule_table(&rules);
    if !conflicts.is_empty() {
        tracing::warn!(
            category = %category_name,
            conflicts = conflicts.len(),
            "Sanction rule table has conflicts; first matching rule wins"
        );
    }

    let results = evaluate(&students, &log, required_checks, &rules)?;

    let filter = SanctionFilter {
        program: params.program,
        year_level: params.year_level,
        search: params.search,
    };
    let results = filter.apply(results);
    let summary = summarize(&results);

    tracing::debug!(
        category = %category_name,
        required_checks,
        sanctioned = summary.sanctioned_students,
        "Sanctions evaluated"
    );

    Ok(Json(DataResponse {
        data: SanctionReport {
            category: category_name,
            required_checks,
            summary,
            results,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_list_is_split_and_trimmed() {
        assert_eq!(
            parse_categories(Some(" Intramurals, ,Orientation ")),
            vec!["Intramurals".to_string(), "Orientation".to_string()]
        );
        assert!(parse_categories(None).is_empty());
        assert!(parse_categories(Some("")).is_empty());
    }
}
