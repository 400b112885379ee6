//! Roster types: students, academic programs, and year levels.
//!
//! The roster is the authoritative set of enrolled students. Program and
//! year-level codes are parsed here so every layer above works with one
//! canonical representation.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::StudentId;

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// Degree program a student is enrolled in.
///
/// Serializes as its code; deserializes through [`FromStr`], so request
/// bodies and query strings get the same leniency as stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Program {
    #[serde(rename = "BSIT")]
    Bsit,
    #[serde(rename = "BSCpE")]
    Bscpe,
    #[serde(rename = "BSECE")]
    Bsece,
    #[serde(rename = "BLIS")]
    Blis,
}

impl Program {
    pub const ALL: [Program; 4] = [Program::Bsit, Program::Bscpe, Program::Bsece, Program::Blis];

    /// The code stored in the database and shown on reports.
    pub fn code(self) -> &'static str {
        match self {
            Program::Bsit => "BSIT",
            Program::Bscpe => "BSCpE",
            Program::Bsece => "BSECE",
            Program::Blis => "BLIS",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Program {
    type Err = CoreError;

    /// Codes are matched case-insensitively ("bscpe" and "BSCpE" are the same).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Program::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown program '{trimmed}'. Must be one of: BSIT, BSCpE, BSECE, BLIS"
                ))
            })
    }
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Year level
// ---------------------------------------------------------------------------

/// Ordinal year level. Ordering follows the academic sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum YearLevel {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "4th Year")]
    Fourth,
}

impl YearLevel {
    pub const ALL: [YearLevel; 4] = [
        YearLevel::First,
        YearLevel::Second,
        YearLevel::Third,
        YearLevel::Fourth,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            YearLevel::First => 1,
            YearLevel::Second => 2,
            YearLevel::Third => 3,
            YearLevel::Fourth => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YearLevel::First => "1st Year",
            YearLevel::Second => "2nd Year",
            YearLevel::Third => "3rd Year",
            YearLevel::Fourth => "4th Year",
        }
    }

    pub fn from_ordinal(n: u8) -> Option<Self> {
        YearLevel::ALL.into_iter().find(|y| y.ordinal() == n)
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for YearLevel {
    type Err = CoreError;

    /// Accepts `"3rd Year"`, `"3rd"`, and `"3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || {
            CoreError::Validation(format!(
                "Unknown year level '{trimmed}'. Expected 1st Year through 4th Year"
            ))
        };

        let lowered = trimmed.to_ascii_lowercase();
        let head = lowered.strip_suffix("year").unwrap_or(&lowered).trim();
        let digits = head
            .strip_suffix("st")
            .or_else(|| head.strip_suffix("nd"))
            .or_else(|| head.strip_suffix("rd"))
            .or_else(|| head.strip_suffix("th"))
            .unwrap_or(head);

        let n: u8 = digits.parse().map_err(|_| invalid())?;
        let level = YearLevel::from_ordinal(n).ok_or_else(invalid)?;

        // Reject mismatched suffixes such as "3st".
        if digits.len() != head.len() && !head.ends_with(&level.label()[1..3]) {
            return Err(invalid());
        }
        Ok(level)
    }
}

impl<'de> Deserialize<'de> for YearLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// An enrolled student. Owned by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program: Program,
    pub year_level: YearLevel,
}

impl Student {
    /// `"First Last"`, the form used by free-text search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validate the mutable fields of a student before it is written.
pub fn validate_student(student: &Student) -> Result<(), CoreError> {
    if student.student_id <= 0 {
        return Err(CoreError::Validation(format!(
            "Student ID must be a positive integer, got {}",
            student.student_id
        )));
    }
    if student.first_name.trim().is_empty() || student.last_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "First and last name must not be empty".into(),
        ));
    }
    Ok(())
}
