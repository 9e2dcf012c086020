//! Configuration and construction of the logging observer

use super::formatter::format_event;
use super::writer::LogWriter;
use crate::events::{Event, EventObserver, ObserverError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the logging observer
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log file path
    pub file_path: PathBuf,
    /// Whether private properties (paths, error internals) are written
    pub include_private: bool,
}

impl LoggingConfig {
    /// Create a new configuration with default values
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            include_private: true,
        }
    }

    /// Set whether private properties are written
    pub fn with_private(mut self, include_private: bool) -> Self {
        self.include_private = include_private;
        self
    }
}

/// Appends every event to a local JSON-lines file
pub struct LoggingObserver {
    config: LoggingConfig,
    writer: LogWriter,
}

impl LoggingObserver {
    /// Create a new logging observer writing to `file_path`
    pub async fn new<P: AsRef<Path>>(file_path: P) -> Result<Self, ObserverError> {
        Self::from_config(LoggingConfig::new(file_path)).await
    }

    /// Create from configuration
    pub async fn from_config(config: LoggingConfig) -> Result<Self, ObserverError> {
        // Ensure parent directory exists
        if let Some(parent) = config.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ObserverError::Io(format!("Failed to create log directory: {e}")))?;
        }

        let writer = LogWriter::new(&config.file_path).await?;

        Ok(Self { config, writer })
    }

    /// Where events are written
    pub fn file_location(&self) -> &Path {
        &self.config.file_path
    }

    /// Ensure all pending writes are flushed
    pub async fn flush(&self) -> Result<(), ObserverError> {
        self.writer.flush().await
    }
}

#[async_trait]
impl EventObserver for LoggingObserver {
    async fn post(&self, event: &Event) -> Result<(), ObserverError> {
        let formatted = format_event(event, self.config.include_private)?;
        self.writer.write(&formatted).await?;

        debug!(
            event = event.name(),
            log_file = %self.config.file_path.display(),
            "Event logged"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_log"
    }
}
