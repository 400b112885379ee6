//! Repository for the `students` table.

use cetso_core::roster::Student;
use cetso_core::types::StudentId;
use sqlx::PgPool;

use crate::models::student::{StudentQuery, StudentRow};
use crate::models::ProgramCountRow;

/// Column list for students queries.
const COLUMNS: &str = "student_id, first_name, last_name, program, year_level, created_at, updated_at";

/// Roster reads and explicit roster edits.
pub struct StudentRepo;

impl StudentRepo {
    /// List students matching `filter`, ordered by last name then first name.
    ///
    /// `search` is a case-insensitive substring match on `"first last"` or on
    /// the student ID. `%` and `_` in it match themselves.
    pub async fn list(pool: &PgPool, filter: &StudentQuery) -> Result<Vec<StudentRow>, sqlx::Error> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE ($1::TEXT IS NULL OR program = $1)
               AND ($2::TEXT IS NULL OR year_level = $2)
               AND ($3::TEXT IS NULL
                    OR strpos(lower(first_name || ' ' || last_name), lower($3)) > 0
                    OR strpos(student_id::TEXT, $3) > 0)
             ORDER BY last_name ASC, first_name ASC"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(filter.program.map(|p| p.code()))
            .bind(filter.year_level.map(|y| y.label()))
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Every student on the roster.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<StudentRow>, sqlx::Error> {
        Self::list(pool, &StudentQuery::default()).await
    }

    /// Enrolled students per program.
    pub async fn count_by_program(pool: &PgPool) -> Result<Vec<ProgramCountRow>, sqlx::Error> {
        sqlx::query_as::<_, ProgramCountRow>(
            "SELECT program, COUNT(*) AS count FROM students GROUP BY program",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a student by exact ID.
    pub async fn find_by_id(
        pool: &PgPool,
        student_id: StudentId,
    ) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_id = $1");
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new student. A duplicate ID violates `uq_students_student_id`.
    pub async fn create(pool: &PgPool, student: &Student) -> Result<StudentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_id, first_name, last_name, program, year_level)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(student.student_id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.program.code())
            .bind(student.year_level.label())
            .fetch_one(pool)
            .await
    }

    /// Overwrite the mutable fields of an existing student.
    ///
    /// Returns `None` when no student has this ID. Past attendance rows keep
    /// the values they were logged with.
    pub async fn update(pool: &PgPool, student: &Student) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                first_name = $2,
                last_name = $3,
                program = $4,
                year_level = $5,
                updated_at = now()
             WHERE student_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(student.student_id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.program.code())
            .bind(student.year_level.label())
            .fetch_optional(pool)
            .await
    }
}
