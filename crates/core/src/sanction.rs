//! Sanction evaluator. Pure logic, no database access.
//!
//! For every student: count logged checks (any session type), derive
//! `absences = max(0, required - count)`, then pick the first rule whose
//! inclusive range covers that count. Results are recomputed on every call
//! and never cached; the log keeps growing between calls.

use std::collections::HashMap;

use serde::Serialize;

use crate::attendance::AttendanceRecord;
use crate::error::CoreError;
use crate::roster::{Program, Student, YearLevel};
use crate::rules::SanctionRule;
use crate::types::StudentId;

/// One sanctioned student. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanctionResult {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: Program,
    pub year_level: YearLevel,
    pub absences: i32,
    pub item: String,
    pub price: f64,
}

/// Where a student stands for one event series at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Standing {
    /// Logged checks meet or exceed the requirement.
    Compliant,
    /// Absent, and `rules[rule_index]` is the tier that applies.
    Sanctioned { absences: i32, rule_index: usize },
    /// Absent beyond every defined range.
    Unsanctionable { absences: i32 },
}

/// `max(0, required - logged)`.
pub fn absences(required_checks: i32, logged_checks: usize) -> i32 {
    let logged = i32::try_from(logged_checks).unwrap_or(i32::MAX);
    required_checks.saturating_sub(logged).max(0)
}

/// Index of the first rule (in input order) covering `absences`.
pub fn match_rule(rules: &[SanctionRule], absences: i32) -> Option<usize> {
    rules.iter().position(|r| r.covers(absences))
}

/// Classify a student given how many checks they logged.
pub fn classify(logged_checks: usize, required_checks: i32, rules: &[SanctionRule]) -> Standing {
    let absences = absences(required_checks, logged_checks);
    if absences == 0 {
        return Standing::Compliant;
    }
    match match_rule(rules, absences) {
        Some(rule_index) => Standing::Sanctioned {
            absences,
            rule_index,
        },
        None => Standing::Unsanctionable { absences },
    }
}

/// Result for one student, or `None` when no sanction applies (compliant or
/// beyond every rule).
pub fn evaluate_student(
    student: &Student,
    logged_checks: usize,
    required_checks: i32,
    rules: &[SanctionRule],
) -> Option<SanctionResult> {
    match classify(logged_checks, required_checks, rules) {
        Standing::Sanctioned {
            absences,
            rule_index,
        } => {
            let rule = &rules[rule_index];
            Some(SanctionResult {
                student_id: student.student_id,
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                program: student.program,
                year_level: student.year_level,
                absences,
                item: rule.item.clone(),
                price: rule.price,
            })
        }
        Standing::Compliant | Standing::Unsanctionable { .. } => None,
    }
}

/// Number of log entries per student. Session type is ignored.
pub fn count_checks(log: &[AttendanceRecord]) -> HashMap<StudentId, usize> {
    let mut counts = HashMap::new();
    for record in log {
        *counts.entry(record.student_id).or_insert(0) += 1;
    }
    counts
}

/// Evaluate the whole roster.
///
/// Output follows roster order and contains only students who are absent at
/// least once and fall inside some rule's range. A negative requirement is
/// rejected before any student is looked at.
pub fn evaluate(
    students: &[Student],
    log: &[AttendanceRecord],
    required_checks: i32,
    rules: &[SanctionRule],
) -> Result<Vec<SanctionResult>, CoreError> {
    if required_checks < 0 {
        return Err(CoreError::Validation(format!(
            "required_checks must not be negative, got {required_checks}"
        )));
    }

    let counts = count_checks(log);
    Ok(students
        .iter()
        .filter_map(|s| {
            let logged = counts.get(&s.student_id).copied().unwrap_or(0);
            evaluate_student(s, logged, required_checks, rules)
        })
        .collect())
}

/// Totals shown above a sanction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanctionSummary {
    pub sanctioned_students: usize,
    pub total_absences: i64,
    pub total_price: f64,
}

pub fn summarize(results: &[SanctionResult]) -> SanctionSummary {
    SanctionSummary {
        sanctioned_students: results.len(),
        total_absences: results.iter().map(|r| i64::from(r.absences)).sum(),
        total_price: results.iter().map(|r| r.price).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::NewAttendanceRecord;
    use crate::rules::{default_rules, rules_for_category, CATEGORY_INTRAMURALS};
    use chrono::{Duration, TimeZone, Utc};

    fn student(id: StudentId, last: &str) -> Student {
        Student {
            student_id: id,
            first_name: "Test".into(),
            last_name: last.into(),
            program: Program::Bsit,
            year_level: YearLevel::First,
        }
    }

    fn logs(id: StudentId, n: usize) -> Vec<AttendanceRecord> {
        let base = Utc.with_ymd_and_hms(2026, 1, 26, 1, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                NewAttendanceRecord::for_student(
                    &student(id, "X"),
                    &format!("EventA S{i}"),
                    base + Duration::minutes(i as i64),
                )
                .into_record(i as i64 + 1)
            })
            .collect()
    }

    fn rule(min: i32, max: i32, item: &str, price: f64) -> SanctionRule {
        SanctionRule {
            category: "EventA".into(),
            min_absences: min,
            max_absences: max,
            item: item.into(),
            price,
        }
    }

    #[test]
    fn absences_floor_at_zero() {
        assert_eq!(absences(12, 3), 9);
        assert_eq!(absences(12, 12), 0);
        assert_eq!(absences(12, 20), 0);
        assert_eq!(absences(0, 0), 0);
    }

    #[test]
    fn nine_absences_match_the_nine_tier() {
        let students = vec![student(42, "A")];
        let rules = vec![rule(7, 7, "X", 95.0), rule(9, 9, "Y", 155.0)];

        let results = evaluate(&students, &logs(42, 3), 12, &rules).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].student_id, 42);
        assert_eq!(results[0].absences, 9);
        assert_eq!(results[0].item, "Y");
        assert_eq!(results[0].price, 155.0);
    }

    #[test]
    fn fully_attended_student_is_excluded() {
        let students = vec![student(42, "A")];
        let rules = vec![rule(1, 12, "X", 95.0)];

        let results = evaluate(&students, &logs(42, 12), 12, &rules).unwrap();
        assert!(results.is_empty());

        let results = evaluate(&students, &logs(42, 15), 12, &rules).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn absences_beyond_every_rule_are_unsanctionable() {
        let students = vec![student(42, "A")];
        let rules = vec![rule(1, 12, "X", 95.0)];

        let results = evaluate(&students, &[], 20, &rules).unwrap();
        assert!(results.is_empty());
        assert_eq!(
            classify(0, 20, &rules),
            Standing::Unsanctionable { absences: 20 }
        );
    }

    #[test]
    fn gap_between_tiers_yields_no_result() {
        let rules = vec![rule(7, 7, "X", 95.0), rule(9, 9, "Y", 155.0)];
        assert_eq!(classify(4, 12, &rules), Standing::Unsanctionable { absences: 8 });
        assert!(evaluate_student(&student(1, "A"), 4, 12, &rules).is_none());
    }

    #[test]
    fn first_matching_rule_wins_on_overlap() {
        let rules = vec![rule(1, 5, "first", 10.0), rule(3, 3, "second", 20.0)];
        let result = evaluate_student(&student(1, "A"), 0, 3, &rules).unwrap();
        assert_eq!(result.item, "first");
    }

    #[test]
    fn session_type_is_not_distinguished_when_counting() {
        let students = vec![student(42, "A")];
        let rules = vec![rule(1, 1, "one", 50.0), rule(2, 2, "two", 70.0)];
        let mut log = logs(42, 1);
        log[0].session_type = "Completely Different PM_OUT".into();

        let results = evaluate(&students, &log, 2, &rules).unwrap();
        assert_eq!(results[0].absences, 1);
        assert_eq!(results[0].item, "one");
    }

    #[test]
    fn other_students_logs_do_not_count() {
        let students = vec![student(42, "A"), student(43, "B")];
        let rules = vec![rule(1, 2, "X", 50.0)];

        let results = evaluate(&students, &logs(43, 2), 2, &rules).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].student_id, 42);
    }

    #[test]
    fn negative_requirement_is_rejected() {
        let err = evaluate(&[student(1, "A")], &[], -1, &[]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let students = vec![student(1, "A"), student(2, "B"), student(3, "C")];
        let mut log = logs(1, 5);
        log.extend(logs(2, 11));
        let rules = rules_for_category(&default_rules(), CATEGORY_INTRAMURALS);

        let first = evaluate(&students, &log, 12, &rules).unwrap();
        let second = evaluate(&students, &log, 12, &rules).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn every_absence_count_in_range_gets_exactly_one_result() {
        let rules = rules_for_category(&default_rules(), CATEGORY_INTRAMURALS);
        for logged in 0..12 {
            let results = evaluate(&[student(1, "A")], &logs(1, logged), 12, &rules).unwrap();
            assert_eq!(results.len(), 1, "logged = {logged}");
            let expected = rules.iter().find(|r| r.covers(12 - logged as i32)).unwrap();
            assert_eq!(results[0].item, expected.item);
            assert_eq!(results[0].price, expected.price);
        }
    }

    #[test]
    fn summary_totals_prices_and_absences() {
        let students = vec![student(1, "A"), student(2, "B")];
        let rules = vec![rule(1, 1, "one", 50.0), rule(2, 2, "two", 70.0)];
        let results = evaluate(&students, &logs(1, 1), 2, &rules).unwrap();

        let summary = summarize(&results);
        assert_eq!(summary.sanctioned_students, 2);
        assert_eq!(summary.total_absences, 3);
        assert_eq!(summary.total_price, 120.0);
    }
}
