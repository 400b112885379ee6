//! Student roster model.

use cetso_core::error::CoreError;
use cetso_core::roster::{Program, Student, YearLevel};
use cetso_core::types::{StudentId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `students` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentRow {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: String,
    pub year_level: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<StudentRow> for Student {
    type Error = CoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student {
            student_id: row.student_id,
            first_name: row.first_name,
            last_name: row.last_name,
            program: row.program.parse()?,
            year_level: row.year_level.parse()?,
        })
    }
}

/// DTO for adding a student to the roster.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(range(min = 1))]
    pub student_id: StudentId,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub program: Program,
    pub year_level: YearLevel,
}

impl CreateStudent {
    /// The roster entry this DTO would create, with names trimmed.
    pub fn to_student(&self) -> Student {
        Student {
            student_id: self.student_id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            program: self.program,
            year_level: self.year_level,
        }
    }
}

/// DTO for an explicit roster edit. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub program: Option<Program>,
    pub year_level: Option<YearLevel>,
}

impl UpdateStudent {
    /// Apply this edit on top of `current`, trimming any new names.
    pub fn apply_to(&self, current: &Student) -> Student {
        Student {
            student_id: current.student_id,
            first_name: self
                .first_name
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: self
                .last_name
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| current.last_name.clone()),
            program: self.program.unwrap_or(current.program),
            year_level: self.year_level.unwrap_or(current.year_level),
        }
    }
}

/// Roster listing filter (`?program=&year_level=&search=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    pub program: Option<Program>,
    pub year_level: Option<YearLevel>,
    pub search: Option<String>,
}
