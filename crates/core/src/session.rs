//! Session-type tags attached to attendance records.
//!
//! A session type is an opaque string such as `"Intramurals AM_IN"`. The
//! recorder never interprets it; these helpers only exist so callers compose
//! tags the same way every time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Time-of-day half of an event day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Am,
    Pm,
}

/// Whether the student is checking in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        })
    }
}

/// Compose `"{event} {AM|PM}_{IN|OUT}"`.
///
/// ```
/// use cetso_core::session::{session_type, Direction, Period};
///
/// assert_eq!(session_type("Intramurals", Period::Am, Direction::In), "Intramurals AM_IN");
/// assert_eq!(session_type(" Orientation ", Period::Pm, Direction::Out), "Orientation PM_OUT");
/// ```
pub fn session_type(event_name: &str, period: Period, direction: Direction) -> String {
    format!("{} {period}_{direction}", event_name.trim())
}

/// A session tag must carry something other than whitespace.
pub fn validate_session_type(tag: &str) -> Result<(), CoreError> {
    if tag.trim().is_empty() {
        return Err(CoreError::Validation(
            "Session type must not be empty".into(),
        ));
    }
    Ok(())
}
