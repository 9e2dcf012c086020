//! File writer for the logging observer

use crate::events::ObserverError;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Append-only log file writer with buffering
pub struct LogWriter {
    writer: Mutex<BufWriter<File>>,
}

impl LogWriter {
    /// Open (or create) the log file for appending
    pub async fn new<P: AsRef<Path>>(file_path: P) -> Result<Self, ObserverError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)
            .await
            .map_err(|e| ObserverError::Io(format!("Failed to open log file: {e}")))?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Write one line to the log file and flush it
    pub async fn write(&self, content: &str) -> Result<usize, ObserverError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(content.as_bytes())
            .await
            .map_err(|e| ObserverError::Io(e.to_string()))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| ObserverError::Io(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| ObserverError::Io(e.to_string()))?;

        Ok(content.len() + 1)
    }

    /// Flush pending writes
    pub async fn flush(&self) -> Result<(), ObserverError> {
        self.writer
            .lock()
            .await
            .flush()
            .await
            .map_err(|e| ObserverError::Io(e.to_string()))
    }
}
