//! Live event bus for open dashboards.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`LiveEvent`]: the event envelope pushed to subscribers.

pub mod bus;

pub use bus::{EventBus, LiveEvent};
