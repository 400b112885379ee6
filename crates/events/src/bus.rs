//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`LiveEvent`]s out to every connected dashboard. It is
//! shared via `Arc<EventBus>` across the application.

use cetso_core::attendance::AttendanceRecord;
use cetso_core::roster::Student;
use cetso_core::types::{StudentId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A scan was appended to the attendance log.
pub const ATTENDANCE_RECORDED: &str = "attendance.recorded";
/// The attendance log was cleared.
pub const ATTENDANCE_RESET: &str = "attendance.reset";
/// A student was added to the roster.
pub const STUDENT_CREATED: &str = "student.created";
/// A roster entry was edited.
pub const STUDENT_UPDATED: &str = "student.updated";

// ---------------------------------------------------------------------------
// LiveEvent
// ---------------------------------------------------------------------------

/// A change to the roster or log that open dashboards should reflect.
///
/// Constructed via [`LiveEvent::new`] or one of the typed constructors and
/// enriched with [`with_student`](LiveEvent::with_student) and
/// [`with_payload`](LiveEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveEvent {
    /// Dot-separated event name, e.g. `"attendance.recorded"`.
    pub event_type: String,

    /// The student the event concerns, if any.
    pub student_id: Option<StudentId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl LiveEvent {
    /// Create an event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            student_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_student(mut self, student_id: StudentId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `attendance.recorded` carrying the stored record.
    pub fn attendance_recorded(record: &AttendanceRecord) -> Self {
        Self::new(ATTENDANCE_RECORDED)
            .with_student(record.student_id)
            .with_payload(serde_json::to_value(record).unwrap_or_default())
    }

    /// `attendance.reset` carrying how many records were removed.
    pub fn attendance_reset(removed: u64) -> Self {
        Self::new(ATTENDANCE_RESET).with_payload(serde_json::json!({ "removed": removed }))
    }

    pub fn student_created(student: &Student) -> Self {
        Self::new(STUDENT_CREATED)
            .with_student(student.student_id)
            .with_payload(serde_json::to_value(student).unwrap_or_default())
    }

    pub fn student_updated(student: &Student) -> Self {
        Self::new(STUDENT_UPDATED)
            .with_student(student.student_id)
            .with_payload(serde_json::to_value(student).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use cetso_events::bus::{EventBus, LiveEvent, ATTENDANCE_RESET};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(LiveEvent::new(ATTENDANCE_RESET));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<LiveEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped; the log itself is the
    /// durable record.
    pub fn publish(&self, event: LiveEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(receivers, "Live event published"),
            Err(_) => tracing::trace!("Live event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
