//! Install script acquisition
//!
//! Resolves the platform's install script through the cached fetch worker,
//! writes it under `<install_root>/install scripts/` and returns its path.
//! Every call posts exactly one event: a completion on success, an error
//! otherwise.

use crate::platform::Platform;
use crate::writer::{FsScriptWriter, ScriptWriter};
use dotnet_acquire_cache::{CacheStore, CachedFetchWorker, FetchRequest, HttpFetcher};
use dotnet_acquire_core::{
    AcquisitionConfig, Error, Event, EventPublisher, Result, INSTALL_SCRIPT_CACHE_KEY,
    INSTALL_SCRIPT_FILE_STEM,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "dotnet install script";

pub struct InstallScriptAcquisitionWorker {
    worker: CachedFetchWorker,
    writer: Arc<dyn ScriptWriter>,
    events: Arc<dyn EventPublisher>,
    script_uri: String,
    script_path: PathBuf,
}

impl InstallScriptAcquisitionWorker {
    /// Worker for the current platform that fetches over HTTP and writes to disk
    pub fn new(
        config: &AcquisitionConfig,
        store: Arc<dyn CacheStore>,
        events: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.http_timeout)?);
        Ok(Self::with_components(
            config,
            Platform::current(),
            CachedFetchWorker::new(store, fetcher),
            Arc::new(FsScriptWriter::new()),
            events,
        ))
    }

    pub fn with_components(
        config: &AcquisitionConfig,
        platform: Platform,
        worker: CachedFetchWorker,
        writer: Arc<dyn ScriptWriter>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        let extension = platform.script_extension();

        // An empty base keeps the URI empty so the fetch is reported as disabled
        let script_uri = if config.script_base_url.trim().is_empty() {
            String::new()
        } else {
            format!("{}{extension}", config.script_base_url)
        };
        let script_path = config
            .install_scripts_dir()
            .join(format!("{INSTALL_SCRIPT_FILE_STEM}{extension}"));

        Self {
            worker,
            writer,
            events,
            script_uri,
            script_path,
        }
    }

    pub fn script_uri(&self) -> &str {
        &self.script_uri
    }

    /// Where the script is written; stable across calls
    pub fn script_path(&self) -> &PathBuf {
        &self.script_path
    }

    /// Make sure the install script exists on disk and return its path.
    ///
    /// The script is served from the cache when present and fetched otherwise.
    /// It is rewritten on every call.
    pub async fn get_install_script_path(&self) -> Result<PathBuf> {
        match self.acquire().await {
            Ok(path) => {
                self.events
                    .post(Event::install_script_acquisition_completed(&path))
                    .await;
                Ok(path)
            }
            Err(cause) => {
                let error = Error::acquisition(RESOURCE, cause);
                self.events
                    .post(Event::install_script_acquisition_error(&error))
                    .await;
                Err(error)
            }
        }
    }

    async fn acquire(&self) -> Result<PathBuf> {
        let request = FetchRequest::new(self.script_uri.as_str(), INSTALL_SCRIPT_CACHE_KEY);

        debug!(uri = %self.script_uri, "Fetching install script");
        let script = match self.worker.get_cached_data(&request).await {
            Ok(script) => script,
            Err(e) => {
                debug!(error = %e, "Install script fetch failed");
                return Err(e.into());
            }
        };

        debug!(path = %self.script_path.display(), bytes = script.len(), "Writing install script");
        if let Err(e) = self.writer.write_script(&script, &self.script_path).await {
            debug!(error = %e, "Install script write failed");
            return Err(e);
        }

        debug!(path = %self.script_path.display(), "Install script ready");
        Ok(self.script_path.clone())
    }
}
