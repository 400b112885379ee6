use std::sync::Arc;

use cetso_core::attendance::AttendanceRecorder;
use cetso_db::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cetso_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fan-out bus feeding the `/live` stream.
    pub event_bus: Arc<cetso_events::EventBus>,
    /// The single append path into the attendance log.
    pub recorder: AttendanceRecorder,
}

impl AppState {
    /// The core store trait over this state's pool.
    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }
}
