//! Release channel index acquisition

use dotnet_acquire_cache::{CacheStore, CachedFetchWorker, FetchRequest, HttpFetcher};
use dotnet_acquire_core::{
    AcquisitionConfig, Error, Event, EventPublisher, Result, RELEASES_CACHE_KEY,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "dotnet release index";

/// The top-level release index published alongside the install scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasesIndex {
    #[serde(rename = "releases-index")]
    pub releases_index: Vec<ReleaseChannel>,
}

/// One entry of the release index, e.g. the `8.0` channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseChannel {
    pub channel_version: String,
    pub latest_release: String,
    pub latest_runtime: String,
    pub latest_sdk: String,
    #[serde(default)]
    pub release_type: Option<String>,
    #[serde(default)]
    pub support_phase: Option<String>,
}

impl ReleasesIndex {
    /// Exact lookup by channel version such as `"8.0"`
    pub fn channel(&self, version: &str) -> Option<&ReleaseChannel> {
        self.releases_index
            .iter()
            .find(|c| c.channel_version == version)
    }

    pub fn channels(&self) -> &[ReleaseChannel] {
        &self.releases_index
    }
}

pub struct ReleaseManifestWorker {
    worker: CachedFetchWorker,
    events: Arc<dyn EventPublisher>,
    releases_uri: String,
}

impl ReleaseManifestWorker {
    pub fn new(
        config: &AcquisitionConfig,
        store: Arc<dyn CacheStore>,
        events: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.http_timeout)?);
        Ok(Self::with_worker(
            config,
            CachedFetchWorker::new(store, fetcher),
            events,
        ))
    }

    pub fn with_worker(
        config: &AcquisitionConfig,
        worker: CachedFetchWorker,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            worker,
            events,
            releases_uri: config.releases_url.clone(),
        }
    }

    /// Fetch (or read from cache) and parse the release index
    pub async fn get_releases_index(&self) -> Result<ReleasesIndex> {
        match self.acquire().await {
            Ok(index) => {
                self.events
                    .post(Event::releases_acquisition_completed(
                        index.releases_index.len(),
                    ))
                    .await;
                Ok(index)
            }
            Err(cause) => {
                let error = Error::acquisition(RESOURCE, cause);
                self.events
                    .post(Event::releases_acquisition_error(&error))
                    .await;
                Err(error)
            }
        }
    }

    async fn acquire(&self) -> Result<ReleasesIndex> {
        let request = FetchRequest::new(self.releases_uri.as_str(), RELEASES_CACHE_KEY);

        debug!(uri = %self.releases_uri, "Fetching release index");
        let content = self.worker.get_cached_data(&request).await?;

        let index: ReleasesIndex = match serde_json::from_str(&content) {
            Ok(index) => index,
            Err(e) => {
                // An unparseable body must not be served from the cache forever
                self.worker.evict(RELEASES_CACHE_KEY).await;
                return Err(Error::Json {
                    message: "Failed to parse release index".to_string(),
                    source: e,
                });
            }
        };

        debug!(channels = index.releases_index.len(), "Release index parsed");
        Ok(index)
    }
}
