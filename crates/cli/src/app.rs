//! Shared state for a single command invocation

use dotnet_acquire_cache::FileStore;
use dotnet_acquire_core::events::{
    global_event_stream, initialize_global_events, ConsoleObserver, ConsoleVerbosity,
    LoggingObserver, TelemetryObserver,
};
use dotnet_acquire_core::{AcquisitionConfig, EventStream, Result, DEFAULT_EVENT_CHANNEL_CAPACITY};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct App {
    pub config: AcquisitionConfig,
    pub store: Arc<FileStore>,
    pub events: Arc<EventStream>,
    log_observer: Option<Arc<LoggingObserver>>,
}

impl App {
    /// Open the cache store and wire the console, log file and telemetry
    /// observers onto the global event stream.
    pub async fn init(config: AcquisitionConfig, verbosity: ConsoleVerbosity) -> Result<Self> {
        let store = Arc::new(FileStore::open(&config.cache_file)?);

        let events = initialize_global_events(DEFAULT_EVENT_CHANNEL_CAPACITY)
            .unwrap_or_else(|_| global_event_stream());

        let use_colors = std::io::stderr().is_terminal();
        events
            .register(Arc::new(ConsoleObserver::with_config(use_colors, verbosity)))
            .await;

        // The event log is best effort; a read-only state dir must not block acquisition
        let log_observer = match LoggingObserver::new(&config.log_file).await {
            Ok(observer) => {
                let observer = Arc::new(observer);
                events.register(observer.clone()).await;
                Some(observer)
            }
            Err(e) => {
                warn!(path = %config.log_file.display(), error = %e, "Event log unavailable");
                None
            }
        };

        events
            .register(Arc::new(TelemetryObserver::from_config(&config)))
            .await;

        debug!(
            install_root = %config.install_root.display(),
            cache_file = %config.cache_file.display(),
            "Application initialized"
        );

        Ok(Self {
            config,
            store,
            events,
            log_observer,
        })
    }

    pub async fn shutdown(&self) {
        if let Some(observer) = &self.log_observer {
            if let Err(e) = observer.flush().await {
                warn!(error = %e, "Failed to flush event log");
            }
        }
    }
}
