//! Sanction rule types, event categories, and rule-table validation.
//!
//! Rules are static reference data: loaded once per evaluation and never
//! mutated by the core. Each category's ranges are expected to be contiguous
//! and non-overlapping; [`validate_rule_table`] reports violations but does
//! not change how the evaluator picks a rule (first match wins).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_INTRAMURALS: &str = "Intramurals";
pub const CATEGORY_ORIENTATION: &str = "Orientation";

/// An event series with its required check-in count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCategory {
    pub name: String,
    pub required_checks: i32,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// One priced sanction tier: `min_absences..=max_absences` maps to `item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanctionRule {
    pub category: String,
    pub min_absences: i32,
    pub max_absences: i32,
    pub item: String,
    pub price: f64,
}

impl SanctionRule {
    /// Inclusive range test.
    pub fn covers(&self, absences: i32) -> bool {
        self.min_absences <= absences && absences <= self.max_absences
    }
}

/// Rules belonging to `category`, in input order.
pub fn rules_for_category(rules: &[SanctionRule], category: &str) -> Vec<SanctionRule> {
    rules
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

/// Validate a single rule row before it is written.
pub fn validate_rule(rule: &SanctionRule) -> Result<(), CoreError> {
    if rule.category.trim().is_empty() {
        return Err(CoreError::Validation("Rule category must not be empty".into()));
    }
    if rule.min_absences < 1 {
        return Err(CoreError::Validation(format!(
            "min_absences must be at least 1, got {}",
            rule.min_absences
        )));
    }
    if rule.max_absences < rule.min_absences {
        return Err(CoreError::Validation(format!(
            "max_absences ({}) must not be below min_absences ({})",
            rule.max_absences, rule.min_absences
        )));
    }
    if !rule.price.is_finite() || rule.price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price must be a non-negative number, got {}",
            rule.price
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rule-table validation
// ---------------------------------------------------------------------------

/// A problem found in a loaded rule table. Indexes refer to the input slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConflict {
    /// A single row failed [`validate_rule`].
    InvalidRule { index: usize, message: String },
    /// Two rows of the same category share at least one absence count.
    Overlap {
        category: String,
        first: usize,
        second: usize,
    },
}

/// Report every malformed row and every overlapping pair within a category.
///
/// An empty result means first-match and only-match coincide for every
/// absence count.
pub fn validate_rule_table(rules: &[SanctionRule]) -> Vec<RuleConflict> {
    let mut conflicts = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        if let Err(e) = validate_rule(rule) {
            conflicts.push(RuleConflict::InvalidRule {
                index,
                message: e.to_string(),
            });
        }
    }

    for i in 0..rules.len() {
        for j in (i + 1)..rules.len() {
            let (a, b) = (&rules[i], &rules[j]);
            if a.category == b.category
                && a.min_absences <= b.max_absences
                && b.min_absences <= a.max_absences
            {
                conflicts.push(RuleConflict::Overlap {
                    category: a.category.clone(),
                    first: i,
                    second: j,
                });
            }
        }
    }

    conflicts
}

/// Seed tiers from the organisation's published guidelines.
pub fn default_rules() -> Vec<SanctionRule> {
    let intramurals: [(i32, i32, &str, f64); 11] = [
        (11, 12, "Lysol Disinfectant Spray 170g", 300.0),
        (10, 10, "1 ream short or long bond paper", 245.0),
        (9, 9, "1 Green Cross 500ml, 1 stamp pad", 155.0),
        (8, 8, "1 pack band aid, 1 small betadine, 1 cotton", 115.0),
        (7, 7, "1 Pilot WB Marker, 2 Sign pens, 1 garbage bag", 95.0),
        (6, 6, "1 cleaning rag, 1 Pilot WB Marker, 1 masking tape", 95.0),
        (5, 5, "1 Pilot WB Marker, 1 garbage bag, 2 sign pens", 95.0),
        (4, 4, "Canned goods / 1kg rice", 90.0),
        (3, 3, "1 pack bond paper, 1 Alcohol 250ml", 80.0),
        (2, 2, "1 short bond paper (20pcs), 1 tissue, 2pcs Carbon", 70.0),
        (1, 1, "1 Garbage bag, 2 sign pens", 50.0),
    ];
    let orientation: [(i32, i32, &str, f64); 2] = [
        (2, 2, "1 pack Tissue, 1 Alcohol 250ml, 1 black ballpen", 70.0),
        (1, 1, "1 Alcohol, 1 Tissue roll", 50.0),
    ];

    let build = |category: &str, rows: &[(i32, i32, &str, f64)]| {
        rows.iter()
            .map(|&(min_absences, max_absences, item, price)| SanctionRule {
                category: category.to_string(),
                min_absences,
                max_absences,
                item: item.to_string(),
                price,
            })
            .collect::<Vec<_>>()
    };

    let mut rules = build(CATEGORY_INTRAMURALS, &intramurals);
    rules.extend(build(CATEGORY_ORIENTATION, &orientation));
    rules
}
