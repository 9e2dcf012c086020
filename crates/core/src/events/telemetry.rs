//! Telemetry observer
//!
//! Forwards sanitized event properties to a `TelemetryReporter`. The transport
//! behind the reporter is not part of this crate; the default reporter emits on
//! the `telemetry` tracing target so a subscriber can ship it wherever it wants.

use crate::config::AcquisitionConfig;
use crate::events::{Event, EventObserver, ObserverError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Destination for telemetry events
pub trait TelemetryReporter: Send + Sync {
    fn send_event(
        &self,
        name: &str,
        properties: Option<&BTreeMap<String, String>>,
    ) -> Result<(), ObserverError>;

    fn send_error_event(
        &self,
        name: &str,
        properties: Option<&BTreeMap<String, String>>,
    ) -> Result<(), ObserverError>;
}

/// Reporter that writes telemetry as structured tracing events
pub struct TracingTelemetryReporter {
    extension_id: String,
    extension_version: String,
    telemetry_key: Option<String>,
}

impl TracingTelemetryReporter {
    pub fn new(config: &AcquisitionConfig) -> Self {
        Self {
            extension_id: config.extension_id.clone(),
            extension_version: config.extension_version.clone(),
            telemetry_key: config.telemetry_key.clone(),
        }
    }

    fn emit(
        &self,
        name: &str,
        properties: Option<&BTreeMap<String, String>>,
        is_error: bool,
    ) -> Result<(), ObserverError> {
        let properties = match properties {
            Some(props) => serde_json::to_string(props)
                .map_err(|e| ObserverError::Serialization(e.to_string()))?,
            None => String::new(),
        };
        info!(
            target: "telemetry",
            extension_id = %self.extension_id,
            extension_version = %self.extension_version,
            telemetry_key = self.telemetry_key.as_deref().unwrap_or(""),
            event_name = name,
            is_error,
            properties = %properties,
            "telemetry_event"
        );
        Ok(())
    }
}

impl TelemetryReporter for TracingTelemetryReporter {
    fn send_event(
        &self,
        name: &str,
        properties: Option<&BTreeMap<String, String>>,
    ) -> Result<(), ObserverError> {
        self.emit(name, properties, false)
    }

    fn send_error_event(
        &self,
        name: &str,
        properties: Option<&BTreeMap<String, String>>,
    ) -> Result<(), ObserverError> {
        self.emit(name, properties, true)
    }
}

/// Observer that forwards every event to telemetry, stripped of private data
pub struct TelemetryObserver {
    reporter: Arc<dyn TelemetryReporter>,
    events_sent: AtomicU64,
    errors_sent: AtomicU64,
}

impl TelemetryObserver {
    pub fn new(reporter: Arc<dyn TelemetryReporter>) -> Self {
        Self {
            reporter,
            events_sent: AtomicU64::new(0),
            errors_sent: AtomicU64::new(0),
        }
    }

    /// Observer backed by the tracing reporter, tagged with the configured identity
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        Self::new(Arc::new(TracingTelemetryReporter::new(config)))
    }

    /// Events forwarded so far, error events included
    pub fn events_sent(&self) -> u64 {
        self.events_sent.load(Ordering::Relaxed)
    }

    pub fn errors_sent(&self) -> u64 {
        self.errors_sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EventObserver for TelemetryObserver {
    async fn post(&self, event: &Event) -> Result<(), ObserverError> {
        let properties = event.sanitized_properties();

        match properties {
            None => self.reporter.send_event(event.name(), None)?,
            Some(ref props) if event.is_error() => {
                self.reporter.send_error_event(event.name(), Some(props))?;
                self.errors_sent.fetch_add(1, Ordering::Relaxed);
            }
            Some(ref props) => self.reporter.send_event(event.name(), Some(props))?,
        }

        self.events_sent.fetch_add(1, Ordering::Relaxed);
        debug!(event = event.name(), "Telemetry event forwarded");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telemetry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::path::Path;

    #[derive(Default)]
    struct MockTelemetryReporter {
        sent: Mutex<Vec<(String, Option<BTreeMap<String, String>>)>>,
    }

    impl TelemetryReporter for MockTelemetryReporter {
        fn send_event(
            &self,
            name: &str,
            properties: Option<&BTreeMap<String, String>>,
        ) -> Result<(), ObserverError> {
            self.sent
                .lock()
                .push((name.to_string(), properties.cloned()));
            Ok(())
        }

        fn send_error_event(
            &self,
            name: &str,
            properties: Option<&BTreeMap<String, String>>,
        ) -> Result<(), ObserverError> {
            self.sent
                .lock()
                .push((format!("[ERROR]:{name}"), properties.cloned()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_event_without_properties_is_sent_by_name() {
        let reporter = Arc::new(MockTelemetryReporter::default());
        let observer = TelemetryObserver::new(reporter.clone());

        // Only a private property, so nothing survives sanitization
        let event = Event::install_script_acquisition_completed(Path::new("/tmp/x.sh"));
        observer.post(&event).await.unwrap();

        let sent = reporter.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "DotnetInstallScriptAcquisitionCompleted");
        assert!(sent[0].1.is_none());
        assert_eq!(observer.events_sent(), 1);
    }

    #[tokio::test]
    async fn test_error_event_routes_to_error_channel() {
        let reporter = Arc::new(MockTelemetryReporter::default());
        let observer = TelemetryObserver::new(reporter.clone());

        let event = Event::error("DotnetInstallScriptAcquisitionError")
            .with_property("error", "request failed")
            .with_private_property("error_detail", "Debug { .. }");
        observer.post(&event).await.unwrap();

        let sent = reporter.sent.lock();
        assert_eq!(sent[0].0, "[ERROR]:DotnetInstallScriptAcquisitionError");
        let props = sent[0].1.as_ref().unwrap();
        assert_eq!(props.get("error").map(String::as_str), Some("request failed"));
        assert!(!props.contains_key("error_detail"));
        assert_eq!(observer.errors_sent(), 1);
    }

    #[tokio::test]
    async fn test_non_error_event_with_properties() {
        let reporter = Arc::new(MockTelemetryReporter::default());
        let observer = TelemetryObserver::new(reporter.clone());

        observer
            .post(&Event::releases_acquisition_completed(7))
            .await
            .unwrap();

        let sent = reporter.sent.lock();
        assert_eq!(sent[0].0, "DotnetReleasesAcquisitionCompleted");
        assert_eq!(
            sent[0].1.as_ref().unwrap().get("channel_count").map(String::as_str),
            Some("7")
        );
        assert_eq!(observer.errors_sent(), 0);
    }

    #[tokio::test]
    async fn test_tracing_reporter_accepts_events() {
        let config = AcquisitionConfig::rooted_at(Path::new("/tmp/acq"))
            .with_telemetry_key(Some("key".to_string()));
        let observer = TelemetryObserver::from_config(&config);

        observer.post(&Event::diagnostic("Ping")).await.unwrap();
        assert_eq!(observer.events_sent(), 1);
    }

    #[test]
    fn test_tracing_reporter_serializes_properties() {
        let config = AcquisitionConfig::rooted_at(Path::new("/tmp/acq"));
        let reporter = TracingTelemetryReporter::new(&config);
        let mut props = BTreeMap::new();
        props.insert("error".to_string(), "quote \" and newline \n".to_string());

        assert!(reporter.send_error_event("Failed", Some(&props)).is_ok());
        assert!(reporter.send_event("Done", None).is_ok());
    }
}
