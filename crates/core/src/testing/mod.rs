//! Observers used by tests across the workspace
//!
//! These are plain implementations of the public traits, compiled into the
//! library so integration tests in other crates can use them.

use crate::events::{Event, EventKind, EventObserver, ObserverError};
use parking_lot::Mutex;

/// Records every event it receives, in order
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait::async_trait]
impl EventObserver for RecordingObserver {
    async fn post(&self, event: &Event) -> Result<(), ObserverError> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Rejects every event
pub struct FailingObserver;

#[async_trait::async_trait]
impl EventObserver for FailingObserver {
    async fn post(&self, _event: &Event) -> Result<(), ObserverError> {
        Err(ObserverError::Io("observer is unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
