//! Cache-first fetching
//!
//! The worker consults the store before going to the network and records a
//! successful fetch under the request's key. There is no expiry: a key, once
//! written, is served until someone overwrites or clears it. Callers that
//! want fresher content choose a different key.

use crate::fetcher::Fetcher;
use crate::store::CacheStore;
use dotnet_acquire_core::FetchError;
use std::sync::Arc;
use tracing::{debug, warn};

/// A URI paired with the key its response is cached under.
/// An empty `uri` means fetching is disabled for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub uri: String,
    pub cache_key: String,
}

impl FetchRequest {
    pub fn new(uri: impl Into<String>, cache_key: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cache_key: cache_key.into(),
        }
    }
}

pub struct CachedFetchWorker {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
}

impl CachedFetchWorker {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Return the cached value for the request's key, fetching and caching it
    /// on a miss. A hit never touches the network.
    ///
    /// A failed fetch leaves the store untouched. A fetch that succeeds but
    /// cannot be cached still returns its content.
    pub async fn get_cached_data(&self, request: &FetchRequest) -> Result<String, FetchError> {
        if let Some(cached) = self.store.get(&request.cache_key) {
            debug!(key = %request.cache_key, "Cache hit");
            return Ok(cached);
        }

        if request.uri.trim().is_empty() {
            debug!(key = %request.cache_key, "Cache miss with no URI configured");
            return Err(FetchError::NoUri);
        }

        debug!(key = %request.cache_key, uri = %request.uri, "Cache miss, fetching");
        let content = self.fetcher.fetch(&request.uri).await?;

        let store = Arc::clone(&self.store);
        let key = request.cache_key.clone();
        let value = content.clone();
        match tokio::task::spawn_blocking(move || store.set(&key, &value)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(key = %request.cache_key, error = %e, "Failed to cache fetched content")
            }
            Err(e) => warn!(key = %request.cache_key, error = %e, "Cache write task failed"),
        }

        Ok(content)
    }

    /// Drop a cached value the caller found unusable, so the next request
    /// goes back to the network. Failures are logged.
    pub async fn evict(&self, cache_key: &str) {
        let store = Arc::clone(&self.store);
        let key = cache_key.to_string();
        match tokio::task::spawn_blocking(move || store.remove(&key)).await {
            Ok(Ok(removed)) => debug!(key = cache_key, removed, "Cache entry evicted"),
            Ok(Err(e)) => warn!(key = cache_key, error = %e, "Failed to evict cache entry"),
            Err(e) => warn!(key = cache_key, error = %e, "Cache evict task failed"),
        }
    }
}
