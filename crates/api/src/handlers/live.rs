//! Server-sent event stream of roster and log changes.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::AppState;

/// GET /live
///
/// Each `LiveEvent` is sent with its `event_type` as the SSE event name and
/// the whole event as JSON data. A subscriber that falls behind the bus
/// buffer skips the missed events and keeps streaming.
pub async fn live_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.event_bus.subscribe();
    tracing::debug!(
        subscribers = state.event_bus.subscriber_count(),
        "Live stream subscriber connected"
    );

    let stream = BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(event) => match Event::default()
            .event(event.event_type.clone())
            .json_data(&event)
        {
            Ok(sse) => Some(Ok(sse)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode live event");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Live stream subscriber lagged");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
