//! Repository for the append-only `attendance_logs` table.

use cetso_core::attendance::NewAttendanceRecord;
use cetso_core::types::StudentId;
use sqlx::PgPool;

use crate::models::attendance::{AttendanceLogRow, AttendanceQuery};
use crate::models::ProgramCountRow;

/// Column list for attendance_logs queries.
const COLUMNS: &str =
    "id, student_id, first_name, last_name, program, year_level, session_type, scanned_at";

pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Page through the log newest first, narrowed by student and/or program.
    pub async fn list(
        pool: &PgPool,
        filter: &AttendanceQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_logs
             WHERE ($1::BIGINT IS NULL OR student_id = $1)
               AND ($2::TEXT IS NULL OR program = $2)
             ORDER BY scanned_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AttendanceLogRow>(&query)
            .bind(filter.student_id)
            .bind(filter.program.map(|p| p.code()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The whole log, unpaged. Used by the sanction evaluator.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AttendanceLogRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance_logs ORDER BY id ASC");
        sqlx::query_as::<_, AttendanceLogRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Every record logged for one student, oldest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_logs WHERE student_id = $1 ORDER BY scanned_at ASC"
        );
        sqlx::query_as::<_, AttendanceLogRow>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Append one record. Single-row insert, so it either lands whole or not
    /// at all.
    pub async fn insert(
        pool: &PgPool,
        record: &NewAttendanceRecord,
    ) -> Result<AttendanceLogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_logs
                (student_id, first_name, last_name, program, year_level, session_type, scanned_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceLogRow>(&query)
            .bind(record.student_id)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(record.program.code())
            .bind(record.year_level.label())
            .bind(&record.session_type)
            .bind(record.timestamp)
            .fetch_one(pool)
            .await
    }

    /// Log entries per program, as logged.
    pub async fn count_by_program(pool: &PgPool) -> Result<Vec<ProgramCountRow>, sqlx::Error> {
        sqlx::query_as::<_, ProgramCountRow>(
            "SELECT program, COUNT(*) AS count FROM attendance_logs GROUP BY program",
        )
        .fetch_all(pool)
        .await
    }

    /// Administrative reset. Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance_logs").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
