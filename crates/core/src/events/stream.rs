//! Event stream for publishing events to registered observers

use crate::events::event::Event;
use crate::events::observer::{EventObserver, EventPublisher};
use crate::constants::DEFAULT_EVENT_CHANNEL_CAPACITY;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

/// Ordered collection of observers plus a broadcast channel for ad-hoc listeners
pub struct EventStream {
    /// Event channel sender
    sender: broadcast::Sender<Arc<Event>>,
    /// Registered observers, in registration order
    observers: RwLock<Vec<Arc<dyn EventObserver>>>,
}

impl EventStream {
    /// Create a new event stream with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Add an observer; it receives events after every observer registered before it
    pub async fn register(&self, observer: Arc<dyn EventObserver>) {
        let name = observer.name();
        self.observers.write().await.push(observer);
        debug!(observer = name, "Event observer registered");
    }

    /// Remove every observer with the given name
    pub async fn remove(&self, name: &str) -> bool {
        let mut observers = self.observers.write().await;
        let initial_len = observers.len();
        observers.retain(|o| o.name() != name);
        let removed = observers.len() != initial_len;
        if removed {
            debug!(observer = name, "Event observer removed");
        }
        removed
    }

    /// Get the number of registered observers
    pub async fn observer_count(&self) -> usize {
        self.observers.read().await.len()
    }

    /// Create a receiver for the broadcast channel
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Event>> {
        self.sender.subscribe()
    }

    /// Publish an event to every interested observer, in registration order.
    ///
    /// An observer that errors or panics is logged and skipped; the rest still
    /// receive the event.
    pub async fn publish(&self, event: Event) {
        let event = Arc::new(event);

        // No receivers is the normal case
        let _ = self.sender.send(Arc::clone(&event));

        let observers: Vec<_> = self.observers.read().await.clone();
        let mut notified = 0usize;

        for observer in observers.iter().filter(|o| o.is_interested(&event)) {
            notified += 1;
            match AssertUnwindSafe(observer.post(&event)).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    observer = observer.name(),
                    event = event.name(),
                    error = %e,
                    "Event observer failed to handle event"
                ),
                Err(_) => warn!(
                    observer = observer.name(),
                    event = event.name(),
                    "Event observer panicked while handling event"
                ),
            }
        }

        debug!(
            event = event.name(),
            kind = ?event.kind(),
            observers_notified = notified,
            "Event published"
        );
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}

#[async_trait::async_trait]
impl EventPublisher for EventStream {
    async fn post(&self, event: Event) {
        self.publish(event).await;
    }
}
