//! Attendance recorder.
//!
//! Turns one raw scanner reading plus a session tag into an appended
//! [`AttendanceRecord`], or into one of the four [`ScanError`] outcomes.
//! Duplicate suppression is a best-effort read-then-write: two scans for the
//! same student racing inside one round-trip can both pass the check.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roster::{Program, Student, YearLevel};
use crate::session::validate_session_type;
use crate::store::AttendanceStore;
use crate::types::{DbId, StudentId, Timestamp};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One successful scan. Never mutated once stored.
///
/// Name, program and year are copies of the canonical student at scan time,
/// kept for display only; `student_id` is the authoritative reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: Program,
    pub year_level: YearLevel,
    pub session_type: String,
    pub timestamp: Timestamp,
}

/// A record that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendanceRecord {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: Program,
    pub year_level: YearLevel,
    pub session_type: String,
    pub timestamp: Timestamp,
}

impl NewAttendanceRecord {
    /// Build from the canonical roster entry, never from caller-supplied fields.
    pub fn for_student(student: &Student, session_type: &str, timestamp: Timestamp) -> Self {
        Self {
            student_id: student.student_id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            program: student.program,
            year_level: student.year_level,
            session_type: session_type.to_string(),
            timestamp,
        }
    }

    pub fn into_record(self, id: DbId) -> AttendanceRecord {
        AttendanceRecord {
            id,
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            program: self.program,
            year_level: self.year_level,
            session_type: self.session_type,
            timestamp: self.timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors and outcome
// ---------------------------------------------------------------------------

/// Why a scan was not recorded. Every variant is terminal; nothing retries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    #[error("{0}")]
    Validation(String),

    #[error("ID {0} not found in roster")]
    NotFound(StudentId),

    /// The matched student is returned so the operator sees who rescanned.
    #[error("Attendance already recorded for {session_type} today")]
    Duplicate {
        student: Student,
        session_type: String,
    },

    #[error("Failed to save attendance: {0}")]
    Persistence(String),
}

/// A recorded scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub student: Student,
    pub record: AttendanceRecord,
}

impl ScanOutcome {
    pub fn message(&self) -> String {
        format!(
            "Recorded {} for {}",
            self.record.session_type,
            self.student.full_name()
        )
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Strip every non-digit and parse what is left as a positive student number.
///
/// Barcode scanners append carriage returns, prefixes and padding; all of it
/// is discarded. Applying this to its own output yields the same ID.
///
/// ```
/// use cetso_core::attendance::normalize_student_id;
///
/// assert_eq!(normalize_student_id("  004 2 ").unwrap(), 42);
/// assert_eq!(normalize_student_id("ID:2023-001\r\n").unwrap(), 2023001);
/// assert!(normalize_student_id("abc").is_err());
/// ```
pub fn normalize_student_id(raw: &str) -> Result<StudentId, ScanError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(ScanError::Validation(format!(
            "Invalid ID '{}': numbers only",
            raw.trim()
        )));
    }

    let id: StudentId = digits
        .parse()
        .map_err(|_| ScanError::Validation(format!("'{digits}' is too large to be a student ID")))?;

    if id <= 0 {
        return Err(ScanError::Validation(format!(
            "Student ID must be positive, got '{digits}'"
        )));
    }
    Ok(id)
}

/// Local calendar date of an instant in the organisation's timezone.
pub fn local_date(timestamp: Timestamp, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// First record in `log` for the same student and session tag on `day`.
pub fn find_same_day_duplicate<'a>(
    log: &'a [AttendanceRecord],
    student_id: StudentId,
    session_type: &str,
    day: NaiveDate,
    offset: FixedOffset,
) -> Option<&'a AttendanceRecord> {
    log.iter().find(|r| {
        r.student_id == student_id
            && r.session_type == session_type
            && local_date(r.timestamp, offset) == day
    })
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Default local offset: UTC+08:00.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Build the fixed offset used to decide calendar days.
pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, CoreError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "UTC offset must be between -23 and +23 hours, got {hours}"
            ))
        })
}

/// Single entry point for appending to the attendance log.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceRecorder {
    offset: FixedOffset,
}

impl AttendanceRecorder {
    /// `offset` decides where one calendar day ends and the next begins.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Validate, deduplicate, and append one scan taken at `now`.
    pub async fn record<S>(
        &self,
        store: &S,
        raw_id: &str,
        session_type: &str,
        now: Timestamp,
    ) -> Result<ScanOutcome, ScanError>
    where
        S: AttendanceStore + ?Sized,
    {
        validate_session_type(session_type).map_err(|e| ScanError::Validation(e.to_string()))?;
        let student_id = normalize_student_id(raw_id)?;

        let student = store
            .find_student(student_id)
            .await
            .map_err(|e| ScanError::Persistence(e.to_string()))?
            .ok_or(ScanError::NotFound(student_id))?;

        let existing = store
            .records_for_student(student_id)
            .await
            .map_err(|e| ScanError::Persistence(e.to_string()))?;

        let today = local_date(now, self.offset);
        if let Some(dup) =
            find_same_day_duplicate(&existing, student_id, session_type, today, self.offset)
        {
            tracing::debug!(
                student_id,
                session_type,
                existing_record = dup.id,
                "Duplicate scan rejected"
            );
            return Err(ScanError::Duplicate {
                student,
                session_type: session_type.to_string(),
            });
        }

        let new_record = NewAttendanceRecord::for_student(&student, session_type, now);
        let record = store.append_record(&new_record).await.map_err(|e| {
            tracing::error!(student_id, session_type, error = %e, "Failed to append attendance");
            ScanError::Persistence(e.to_string())
        })?;

        tracing::info!(student_id, session_type, record_id = record.id, "Attendance recorded");
        Ok(ScanOutcome { student, record })
    }
}
