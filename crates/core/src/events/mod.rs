//! Event stream for reporting acquisition outcomes
//!
//! Workers publish `Event`s at each success or failure boundary. The
//! `EventStream` hands every event to its registered observers in order;
//! an observer that fails is logged and skipped so it can never break the
//! operation that published the event.

pub mod console;
pub mod json_log;
pub mod telemetry;

mod error;
mod event;
mod global;
mod observer;
mod stream;

pub use console::{ConsoleObserver, ConsoleVerbosity};
pub use error::{EventSystemError, ObserverError};
pub use event::*;
pub use global::{global_event_stream, initialize_global_events};
pub use json_log::{LoggingConfig, LoggingObserver};
pub use observer::{EventObserver, EventPublisher};
pub use stream::EventStream;
pub use telemetry::{TelemetryObserver, TelemetryReporter, TracingTelemetryReporter};
