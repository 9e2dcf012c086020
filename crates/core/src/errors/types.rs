//! Core error type definitions

use super::fetch::{FetchError, FetchFailureReason};
use std::path::PathBuf;

/// Result type alias for dotnet-acquire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dotnet-acquire operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Content could not be retrieved from the network boundary
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetched value could not be persisted to the cache store.
    /// Never surfaced by the fetch worker; it is logged and dropped.
    #[error("failed to write cache entry '{key}': {source}")]
    CacheWrite {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The install script could not be materialised on disk
    #[error("failed to write install script '{}' ({operation}): {source}", .path.display())]
    ScriptWrite {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Top-level failure of an acquisition call, wrapping the root cause
    #[error("failed to acquire {resource}: {cause}")]
    Acquisition {
        resource: String,
        #[source]
        cause: Box<Error>,
    },

    /// File system operations outside of script writing
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// The innermost error, looking through any `Acquisition` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Acquisition { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// The fetch failure reason, if the root cause is a fetch failure.
    pub fn fetch_reason(&self) -> Option<FetchFailureReason> {
        match self.root_cause() {
            Error::Fetch(fetch) => Some(fetch.reason()),
            _ => None,
        }
    }

    /// Short machine-friendly name of the root cause, used in event properties.
    pub fn kind(&self) -> &'static str {
        match self.root_cause() {
            Error::Fetch(_) => "fetch_failed",
            Error::CacheWrite { .. } => "cache_write_failed",
            Error::ScriptWrite { .. } => "script_write_failed",
            Error::Acquisition { .. } => "acquisition_failed",
            Error::FileSystem { .. } => "file_system",
            Error::Json { .. } => "json",
            Error::Configuration { .. } => "configuration",
        }
    }
}
