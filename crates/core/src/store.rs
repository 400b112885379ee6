//! Persistence boundary used by the attendance recorder.
//!
//! [`AttendanceStore`] is the minimal contract the core needs from whatever
//! holds the roster, the attendance log, and the rule table. The database
//! crate implements it over PostgreSQL; [`MemoryStore`] is an in-process
//! implementation for tests and offline runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::attendance::{AttendanceRecord, NewAttendanceRecord};
use crate::roster::Student;
use crate::rules::SanctionRule;
use crate::types::{DbId, StudentId};

/// A failure inside the backing store. Carries a display message only; the
/// concrete driver error is logged where it happens.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Read/append access to the roster, the attendance log, and the rules.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Every student on the roster. No ordering contract.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;

    /// Exact match on `student_id`.
    async fn find_student(&self, student_id: StudentId) -> Result<Option<Student>, StoreError>;

    /// The whole log. Consumers must not rely on ordering.
    async fn list_records(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// All records logged for one student.
    async fn records_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Append one record. Must either store the whole record or fail.
    async fn append_record(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Administrative reset. Returns how many records were removed.
    async fn clear_records(&self) -> Result<u64, StoreError>;

    /// Rules for the given categories; all rules when `categories` is empty.
    async fn list_rules(&self, categories: &[String]) -> Result<Vec<SanctionRule>, StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    students: Vec<Student>,
    records: Vec<AttendanceRecord>,
    rules: Vec<SanctionRule>,
    next_id: DbId,
    fail_appends: bool,
}

/// Roster, log, and rules held in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new(students: Vec<Student>, rules: Vec<SanctionRule>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                students,
                rules,
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Seed an existing record, e.g. one logged on an earlier day.
    pub async fn push_record(&self, record: AttendanceRecord) {
        let mut state = self.state.write().await;
        state.next_id = state.next_id.max(record.id + 1);
        state.records.push(record);
    }

    /// Make every subsequent append fail, to exercise the persistence path.
    pub async fn set_fail_appends(&self, fail: bool) {
        self.state.write().await.fail_appends = fail;
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.state.read().await.students.clone())
    }

    async fn find_student(&self, student_id: StudentId) -> Result<Option<Student>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .students
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    async fn list_records(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self.state.read().await.records.clone())
    }

    async fn records_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .records
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn append_record(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut state = self.state.write().await;
        if state.fail_appends {
            return Err(StoreError("append rejected by store".into()));
        }
        let id = state.next_id;
        state.next_id += 1;
        let stored = record.clone().into_record(id);
        state.records.push(stored.clone());
        Ok(stored)
    }

    async fn clear_records(&self) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.records.len() as u64;
        state.records.clear();
        Ok(removed)
    }

    async fn list_rules(&self, categories: &[String]) -> Result<Vec<SanctionRule>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .rules
            .iter()
            .filter(|r| categories.is_empty() || categories.contains(&r.category))
            .cloned()
            .collect())
    }
}
