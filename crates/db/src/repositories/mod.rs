//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod event_category_repo;
pub mod sanction_rule_repo;
pub mod student_repo;

pub use attendance_repo::AttendanceRepo;
pub use event_category_repo::EventCategoryRepo;
pub use sanction_rule_repo::SanctionRuleRepo;
pub use student_repo::StudentRepo;
