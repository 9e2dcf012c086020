//! Failures raised at the network-fetch boundary

use serde::Serialize;
use std::fmt;

/// Why a fetch failed, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailureReason {
    NoUri,
    NetworkError,
    BadResponse,
}

impl fmt::Display for FetchFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchFailureReason::NoUri => "no_uri",
            FetchFailureReason::NetworkError => "network_error",
            FetchFailureReason::BadResponse => "bad_response",
        };
        f.write_str(name)
    }
}

/// A fetch could not produce content
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request carried an empty URI: fetching is disabled for it
    #[error("no URI configured for the request")]
    NoUri,

    /// Transport-level failure, including URIs that do not parse
    #[error("request to '{uri}' failed: {message}")]
    Network {
        uri: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered with a non-success status code
    #[error("request to '{uri}' returned status {status}")]
    BadResponse { uri: String, status: u16 },
}

impl FetchError {
    /// Create a network error with its transport cause
    #[must_use]
    pub fn network(
        uri: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        FetchError::Network {
            uri: uri.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a bad-response error
    #[must_use]
    pub fn bad_response(uri: impl Into<String>, status: u16) -> Self {
        FetchError::BadResponse {
            uri: uri.into(),
            status,
        }
    }

    pub fn reason(&self) -> FetchFailureReason {
        match self {
            FetchError::NoUri => FetchFailureReason::NoUri,
            FetchError::Network { .. } => FetchFailureReason::NetworkError,
            FetchError::BadResponse { .. } => FetchFailureReason::BadResponse,
        }
    }
}
