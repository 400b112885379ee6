//! Post-filter for sanction listings.
//!
//! Narrowing by program, year level, or a name/ID search happens after
//! evaluation and never changes which students are sanctioned.

use serde::Deserialize;

use crate::roster::{Program, YearLevel};
use crate::sanction::SanctionResult;

/// Listing filter. Every `None` field matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanctionFilter {
    pub program: Option<Program>,
    pub year_level: Option<YearLevel>,
    pub search: Option<String>,
}

impl SanctionFilter {
    pub fn matches(&self, result: &SanctionResult) -> bool {
        if self.program.is_some_and(|p| p != result.program) {
            return false;
        }
        if self.year_level.is_some_and(|y| y != result.year_level) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                let name = format!("{} {}", result.first_name, result.last_name).to_lowercase();
                name.contains(&needle) || result.student_id.to_string().contains(&needle)
            }
        }
    }

    /// Keep matching rows, sorted by last name then first name.
    pub fn apply(&self, results: Vec<SanctionResult>) -> Vec<SanctionResult> {
        let mut kept: Vec<SanctionResult> =
            results.into_iter().filter(|r| self.matches(r)).collect();
        kept.sort_by(|a, b| {
            a.last_name
                .to_lowercase()
                .cmp(&b.last_name.to_lowercase())
                .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
        });
        kept
    }
}
