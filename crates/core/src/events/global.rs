//! Process-wide event stream

use crate::events::error::EventSystemError;
use crate::events::stream::EventStream;
use crate::constants::DEFAULT_EVENT_CHANNEL_CAPACITY;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Global event stream instance
static GLOBAL_EVENT_STREAM: OnceLock<Arc<EventStream>> = OnceLock::new();

/// Initialize the global event stream with custom capacity
pub fn initialize_global_events(capacity: usize) -> Result<Arc<EventStream>, EventSystemError> {
    let stream = Arc::new(EventStream::new(capacity));

    GLOBAL_EVENT_STREAM
        .set(stream.clone())
        .map_err(|_| EventSystemError::AlreadyInitialized)?;

    debug!("Global event stream initialized with capacity {}", capacity);
    Ok(stream)
}

/// Get the global event stream (initializing with default capacity if needed)
pub fn global_event_stream() -> Arc<EventStream> {
    GLOBAL_EVENT_STREAM
        .get_or_init(|| {
            debug!("Auto-initializing global event stream with default capacity");
            Arc::new(EventStream::new(DEFAULT_EVENT_CHANNEL_CAPACITY))
        })
        .clone()
}
