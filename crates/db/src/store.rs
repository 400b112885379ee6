//! [`AttendanceStore`] over PostgreSQL.

use async_trait::async_trait;
use cetso_core::attendance::{AttendanceRecord, NewAttendanceRecord};
use cetso_core::roster::Student;
use cetso_core::rules::SanctionRule;
use cetso_core::store::{AttendanceStore, StoreError};
use cetso_core::types::StudentId;

use crate::models::decode_error;
use crate::repositories::{AttendanceRepo, SanctionRuleRepo, StudentRepo};
use crate::DbPool;

/// Pool-backed store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Log the driver error and keep only its message.
fn store_error(op: &'static str, err: sqlx::Error) -> StoreError {
    tracing::error!(op, error = %err, "Attendance store query failed");
    StoreError(err.to_string())
}

fn convert_all<R, T>(op: &'static str, rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = cetso_core::error::CoreError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(|e| store_error(op, decode_error(e))))
        .collect()
}

#[async_trait]
impl AttendanceStore for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let rows = StudentRepo::list_all(&self.pool)
            .await
            .map_err(|e| store_error("list_students", e))?;
        convert_all("list_students", rows)
    }

    async fn find_student(&self, student_id: StudentId) -> Result<Option<Student>, StoreError> {
        StudentRepo::find_by_id(&self.pool, student_id)
            .await
            .map_err(|e| store_error("find_student", e))?
            .map(|row| Student::try_from(row).map_err(|e| store_error("find_student", decode_error(e))))
            .transpose()
    }

    async fn list_records(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = AttendanceRepo::list_all(&self.pool)
            .await
            .map_err(|e| store_error("list_records", e))?;
        convert_all("list_records", rows)
    }

    async fn records_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = AttendanceRepo::list_for_student(&self.pool, student_id)
            .await
            .map_err(|e| store_error("records_for_student", e))?;
        convert_all("records_for_student", rows)
    }

    async fn append_record(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        let row = AttendanceRepo::insert(&self.pool, record)
            .await
            .map_err(|e| store_error("append_record", e))?;
        AttendanceRecord::try_from(row).map_err(|e| store_error("append_record", decode_error(e)))
    }

    async fn clear_records(&self) -> Result<u64, StoreError> {
        AttendanceRepo::delete_all(&self.pool)
            .await
            .map_err(|e| store_error("clear_records", e))
    }

    async fn list_rules(&self, categories: &[String]) -> Result<Vec<SanctionRule>, StoreError> {
        let rows = SanctionRuleRepo::list_by_categories(&self.pool, categories)
            .await
            .map_err(|e| store_error("list_rules", e))?;
        Ok(rows.into_iter().map(SanctionRule::from).collect())
    }
}
