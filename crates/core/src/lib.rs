//! Core domain types, errors and the event stream for `dotnet-acquire`.
//!
//! This crate holds the pieces every other crate in the workspace agrees on:
//!
//! - **`errors`**: the `Error` taxonomy and `Result` alias, including the
//!   `FetchError` raised at the network boundary.
//! - **`events`**: the process-wide `EventStream`, the `Event` value that flows
//!   through it, and the built-in observers (console, JSON log, telemetry).
//! - **`config`**: the injected `AcquisitionConfig`.
//! - **`constants`**: environment variable names, default endpoints and cache keys.
//! - **`testing`**: observers and helpers shared by the workspace's tests.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod testing;

pub use self::{
    config::AcquisitionConfig,
    constants::*,
    errors::{Error, FetchError, FetchFailureReason, Result},
    events::{
        Event, EventKind, EventObserver, EventPublisher, EventStream, CACHE_CLEARED,
        INSTALL_SCRIPT_ACQUISITION_COMPLETED, INSTALL_SCRIPT_ACQUISITION_ERROR,
        RELEASES_ACQUISITION_COMPLETED, RELEASES_ACQUISITION_ERROR,
    },
};
