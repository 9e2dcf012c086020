//! Tests for the logging observer

use super::config::{LoggingConfig, LoggingObserver};
use super::formatter::format_event;
use crate::events::{Event, EventObserver};
use tempfile::TempDir;
use tokio::fs;

#[tokio::test]
async fn test_logging_observer_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("events.jsonl");

    let observer = LoggingObserver::new(&log_path).await.unwrap();

    assert_eq!(observer.file_location(), log_path.as_path());
    assert!(fs::metadata(&log_path).await.is_ok());
}

#[tokio::test]
async fn test_logging_observer_writes_one_line_per_event() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("events.jsonl");
    let observer = LoggingObserver::new(&log_path).await.unwrap();

    observer
        .post(&Event::completed("DotnetInstallScriptAcquisitionCompleted"))
        .await
        .unwrap();
    observer
        .post(&Event::error("DotnetInstallScriptAcquisitionError").with_property("error", "boom"))
        .await
        .unwrap();
    observer.flush().await.unwrap();

    let content = fs::read_to_string(&log_path).await.unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["name"], "DotnetInstallScriptAcquisitionCompleted");
    assert_eq!(first["kind"], "completed");
    assert_eq!(first["is_error"], false);
    assert!(first["timestamp"].is_string());

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["kind"], "error");
    assert_eq!(second["properties"]["error"], "boom");
}

#[tokio::test]
async fn test_logging_observer_appends_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("events.jsonl");

    for _ in 0..2 {
        let observer = LoggingObserver::new(&log_path).await.unwrap();
        observer.post(&Event::diagnostic("Ping")).await.unwrap();
    }

    let content = fs::read_to_string(&log_path).await.unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_format_event_respects_private_flag() {
    let event = Event::completed("Done")
        .with_property("channel_count", "4")
        .with_private_property("script_path", "/opt/acq/install scripts/dotnet-install.sh");

    let full: serde_json::Value =
        serde_json::from_str(&format_event(&event, true).unwrap()).unwrap();
    assert!(full["properties"]["script_path"].is_string());

    let sanitized: serde_json::Value =
        serde_json::from_str(&format_event(&event, false).unwrap()).unwrap();
    assert!(sanitized["properties"]["script_path"].is_null());
    assert_eq!(sanitized["properties"]["channel_count"], "4");
}

#[tokio::test]
async fn test_logging_config_without_private_properties() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("events.jsonl");
    let observer = LoggingObserver::from_config(LoggingConfig::new(&log_path).with_private(false))
        .await
        .unwrap();

    observer
        .post(&Event::completed("Done").with_private_property("script_path", "/secret"))
        .await
        .unwrap();

    let content = fs::read_to_string(&log_path).await.unwrap();
    assert!(!content.contains("/secret"));
}
