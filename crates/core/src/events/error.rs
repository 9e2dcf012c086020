//! Event system errors

/// Failure of a single observer while handling an event.
///
/// These never propagate to the publisher; the stream logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Reporter error: {0}")]
    Reporter(String),
}

/// Event system lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum EventSystemError {
    #[error("Event system already initialized")]
    AlreadyInitialized,
}
