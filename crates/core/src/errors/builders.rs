//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a cache write error
    #[must_use]
    pub fn cache_write(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::CacheWrite {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Create a script write error for the failing step
    #[must_use]
    pub fn script_write(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::ScriptWrite {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Wrap a failure as the top-level error of an acquisition call
    #[must_use]
    pub fn acquisition(resource: impl Into<String>, cause: Error) -> Self {
        Error::Acquisition {
            resource: resource.into(),
            cause: Box::new(cause),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
