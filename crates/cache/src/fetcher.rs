//! Network fetch boundary

use async_trait::async_trait;
use dotnet_acquire_core::{Error, FetchError, Result, DEFAULT_USER_AGENT};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Retrieves the body of a URI as text.
///
/// Implementations must map every failure onto [`FetchError`]; an empty URI is
/// always [`FetchError::NoUri`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> std::result::Result<String, FetchError>;
}

/// HTTP(S) GET fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> std::result::Result<String, FetchError> {
        if uri.trim().is_empty() {
            return Err(FetchError::NoUri);
        }

        let parsed_url =
            Url::parse(uri).map_err(|e| FetchError::network(uri, "invalid URI", e))?;

        debug!("Fetching content from URL: {uri}");

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| FetchError::network(uri, "request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::bad_response(uri, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::network(uri, "failed to read response body", e))
    }
}
