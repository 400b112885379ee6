//! Attendance and sanction domain logic.
//!
//! Pure types and rules with no database or HTTP dependencies:
//!
//! - [`attendance`]: the recorder. ID normalisation, same-day duplicate
//!   suppression, append through an [`store::AttendanceStore`].
//! - [`sanction`]: the evaluator. Absences per student mapped onto priced
//!   tiers.
//! - [`rules`]: rule and event-category types plus rule-table validation.
//! - [`sanction_filter`]: program/year/search narrowing of results.

pub mod attendance;
pub mod error;
pub mod pagination;
pub mod roster;
pub mod rules;
pub mod sanction;
pub mod sanction_filter;
pub mod session;
pub mod store;
pub mod types;
