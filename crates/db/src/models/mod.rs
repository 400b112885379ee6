//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - Conversion into the matching `cetso_core` type
//! - `Deserialize` create/update DTOs where the table is writable

use cetso_core::error::CoreError;
use serde::Serialize;
use sqlx::FromRow;

pub mod attendance;
pub mod event_category;
pub mod sanction_rule;
pub mod student;

/// One `GROUP BY program` bucket.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProgramCountRow {
    pub program: String,
    pub count: i64,
}

/// Wrap a code-parsing failure as a column decode error.
///
/// Program and year-level columns are constrained in SQL, so this only fires
/// when the table was edited outside the service.
pub(crate) fn decode_error(err: CoreError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
