//! Attendance log model.

use cetso_core::attendance::AttendanceRecord;
use cetso_core::error::CoreError;
use cetso_core::roster::Program;
use cetso_core::types::{DbId, StudentId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance_logs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceLogRow {
    pub id: DbId,
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: String,
    pub year_level: String,
    pub session_type: String,
    pub scanned_at: Timestamp,
}

/// Log listing filter. `program` matches the program the student had when
/// the record was logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    pub student_id: Option<StudentId>,
    pub program: Option<Program>,
}

impl TryFrom<AttendanceLogRow> for AttendanceRecord {
    type Error = CoreError;

    fn try_from(row: AttendanceLogRow) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord {
            id: row.id,
            student_id: row.student_id,
            first_name: row.first_name,
            last_name: row.last_name,
            program: row.program.parse()?,
            year_level: row.year_level.parse()?,
            session_type: row.session_type,
            timestamp: row.scanned_at,
        })
    }
}
