//! Observer and publisher capabilities

use crate::events::error::ObserverError;
use crate::events::event::Event;

/// A registered listener that receives every published event it is
/// interested in. Observers never influence control flow.
#[async_trait::async_trait]
pub trait EventObserver: Send + Sync {
    /// Handle an event
    async fn post(&self, event: &Event) -> Result<(), ObserverError>;

    /// Observer name for debugging
    fn name(&self) -> &'static str;

    /// Check if observer is interested in this event
    fn is_interested(&self, _event: &Event) -> bool {
        true
    }
}

/// Anything events can be posted to. Fire-and-forget: posting cannot fail.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn post(&self, event: Event);
}
