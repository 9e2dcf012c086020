//! Error types for dotnet-acquire operations

mod builders;
mod conversions;
mod fetch;
mod types;

pub use fetch::{FetchError, FetchFailureReason};
pub use types::{Error, Result};
