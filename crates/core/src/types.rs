/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Externally assigned student number (the value printed on the ID barcode).
pub type StudentId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
