//! Install script acquisition against in-memory stores and fake fetchers

use async_trait::async_trait;
use dotnet_acquire_acquisition::{
    FsScriptWriter, InstallScriptAcquisitionWorker, Platform, ScriptWriter,
};
use dotnet_acquire_cache::testing::StaticFetcher;
use dotnet_acquire_cache::{CacheStore, CachedFetchWorker, MemoryStore};
use dotnet_acquire_core::testing::RecordingObserver;
use dotnet_acquire_core::{
    AcquisitionConfig, Error, EventKind, EventStream, FetchFailureReason,
    INSTALL_SCRIPT_ACQUISITION_COMPLETED, INSTALL_SCRIPT_ACQUISITION_ERROR,
    INSTALL_SCRIPT_CACHE_KEY,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const SCRIPT: &str = "#!/usr/bin/env bash\necho installing dotnet\n";

/// Rejects every write the way a full or read-only disk would
struct FailingWriter;

#[async_trait]
impl ScriptWriter for FailingWriter {
    async fn write_script(&self, _content: &str, path: &Path) -> dotnet_acquire_core::Result<()> {
        Err(Error::script_write(
            path,
            "write",
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to write file"),
        ))
    }
}

struct Harness {
    _temp_dir: TempDir,
    config: AcquisitionConfig,
    store: Arc<MemoryStore>,
    fetcher: Arc<StaticFetcher>,
    recorder: Arc<RecordingObserver>,
    events: Arc<EventStream>,
}

impl Harness {
    async fn new(fetcher: StaticFetcher) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = AcquisitionConfig::rooted_at(temp_dir.path())
            .with_script_base_url("https://dot.net/v1/dotnet-install");
        let recorder = Arc::new(RecordingObserver::new());
        let events = Arc::new(EventStream::default());
        events.register(recorder.clone()).await;

        Self {
            _temp_dir: temp_dir,
            config,
            store: Arc::new(MemoryStore::new()),
            fetcher: Arc::new(fetcher),
            recorder,
            events,
        }
    }

    fn acquisition(&self, writer: Arc<dyn ScriptWriter>) -> InstallScriptAcquisitionWorker {
        InstallScriptAcquisitionWorker::with_components(
            &self.config,
            Platform::Unix,
            CachedFetchWorker::new(self.store.clone(), self.fetcher.clone()),
            writer,
            self.events.clone(),
        )
    }
}

#[tokio::test]
async fn test_success_writes_script_and_posts_completion() {
    let harness = Harness::new(StaticFetcher::ok(SCRIPT)).await;
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    let path = acquisition.get_install_script_path().await.unwrap();

    assert_eq!(
        path,
        harness
            .config
            .install_root
            .join("install scripts")
            .join("dotnet-install.sh")
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SCRIPT);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    assert_eq!(
        harness.recorder.names(),
        vec![INSTALL_SCRIPT_ACQUISITION_COMPLETED.to_string()]
    );
    assert_eq!(
        harness.fetcher.requested_uris(),
        vec!["https://dot.net/v1/dotnet-install.sh".to_string()]
    );
}

#[tokio::test]
async fn test_failing_writer_posts_one_error() {
    let harness = Harness::new(StaticFetcher::ok(SCRIPT)).await;
    let acquisition = harness.acquisition(Arc::new(FailingWriter));

    let err = acquisition.get_install_script_path().await.unwrap_err();

    assert!(matches!(err, Error::Acquisition { .. }));
    assert!(err.to_string().contains("Failed to write file"));
    assert!(matches!(err.root_cause(), Error::ScriptWrite { .. }));

    let events = harness.recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), INSTALL_SCRIPT_ACQUISITION_ERROR);
    assert_eq!(events[0].kind(), EventKind::Error);
    assert!(events[0].property("error").unwrap().contains("Failed to write file"));
    assert_eq!(events[0].property("error_kind"), Some("script_write_failed"));
}

#[tokio::test]
async fn test_warm_cache_reuses_script() {
    let harness = Harness::new(StaticFetcher::ok(SCRIPT)).await;
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    let first = acquisition.get_install_script_path().await.unwrap();
    let second = acquisition.get_install_script_path().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(harness.fetcher.calls(), 1);
    assert_eq!(harness.recorder.count_of(EventKind::Completed), 2);
    assert_eq!(
        harness.store.get(INSTALL_SCRIPT_CACHE_KEY).as_deref(),
        Some(SCRIPT)
    );
}

#[tokio::test]
async fn test_empty_base_url_reports_no_uri() {
    let mut harness = Harness::new(StaticFetcher::ok(SCRIPT)).await;
    harness.config = harness.config.clone().with_script_base_url("");
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    assert_eq!(acquisition.script_uri(), "");
    let err = acquisition.get_install_script_path().await.unwrap_err();

    assert_eq!(err.fetch_reason(), Some(FetchFailureReason::NoUri));
    assert_eq!(harness.fetcher.calls(), 0);
    assert!(!acquisition.script_path().exists());

    let events = harness.recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].property("fetch_reason"), Some("no_uri"));
}

#[tokio::test]
async fn test_bad_response_is_not_cached() {
    let harness = Harness::new(StaticFetcher::status(500)).await;
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    let err = acquisition.get_install_script_path().await.unwrap_err();

    assert_eq!(err.fetch_reason(), Some(FetchFailureReason::BadResponse));
    assert!(harness.store.is_empty());
    assert_eq!(harness.recorder.count_of(EventKind::Error), 1);
}

#[tokio::test]
async fn test_windows_platform_uses_powershell_script() {
    let harness = Harness::new(StaticFetcher::ok("Write-Host hi")).await;
    let acquisition = InstallScriptAcquisitionWorker::with_components(
        &harness.config,
        Platform::Windows,
        CachedFetchWorker::new(harness.store.clone(), harness.fetcher.clone()),
        Arc::new(FsScriptWriter::new()),
        harness.events.clone(),
    );

    let path = acquisition.get_install_script_path().await.unwrap();

    assert!(path.ends_with("install scripts/dotnet-install.ps1"));
    assert_eq!(
        harness.fetcher.requested_uris(),
        vec!["https://dot.net/v1/dotnet-install.ps1".to_string()]
    );
}

#[tokio::test]
async fn test_network_failure_posts_one_error() {
    let harness = Harness::new(StaticFetcher::unreachable("connection refused")).await;
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    let err = acquisition.get_install_script_path().await.unwrap_err();

    assert_eq!(err.fetch_reason(), Some(FetchFailureReason::NetworkError));
    assert!(err.to_string().contains("connection refused"));
    assert!(harness.store.is_empty());
    assert!(!acquisition.script_path().exists());

    let events = harness.recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), EventKind::Error);
    assert_eq!(events[0].property("fetch_reason"), Some("network_error"));
}

#[tokio::test]
async fn test_whitespace_base_url_reports_no_uri() {
    let mut harness = Harness::new(StaticFetcher::ok(SCRIPT)).await;
    harness.config = harness.config.clone().with_script_base_url("  ");
    let acquisition = harness.acquisition(Arc::new(FsScriptWriter::new()));

    assert_eq!(acquisition.script_uri(), "");
    let err = acquisition.get_install_script_path().await.unwrap_err();

    assert_eq!(err.fetch_reason(), Some(FetchFailureReason::NoUri));
    assert_eq!(harness.fetcher.calls(), 0);
    assert!(harness.store.is_empty());
}
