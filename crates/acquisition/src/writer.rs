//! Materialising the install script on disk

use async_trait::async_trait;
use dotnet_acquire_core::{Error, Result};
use dotnet_acquire_utils::write_atomic_with_mode;
use std::path::Path;
use tracing::debug;

/// Mode given to the install script so it can be executed directly
pub const SCRIPT_MODE: u32 = 0o777;

#[async_trait]
pub trait ScriptWriter: Send + Sync {
    /// Write `content` to `path`, replacing any previous file
    async fn write_script(&self, content: &str, path: &Path) -> Result<()>;
}

/// Writes scripts to the local file system.
///
/// Missing ancestors are created, the content lands through a temporary file
/// and a rename, and the executable mode is applied before the rename. A
/// failed write leaves no partial file behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsScriptWriter;

impl FsScriptWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptWriter for FsScriptWriter {
    async fn write_script(&self, content: &str, path: &Path) -> Result<()> {
        let target = path.to_path_buf();
        let bytes = content.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || {
            write_atomic_with_mode(&target, &bytes, Some(SCRIPT_MODE))
                .map_err(|e| e.into_script_write())
        })
        .await
        .map_err(|e| {
            Error::script_write(
                path,
                "join write task",
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            )
        })??;

        debug!(path = %path.display(), "Install script written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_missing_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir
            .path()
            .join("a")
            .join("install scripts")
            .join("dotnet-install.sh");

        FsScriptWriter::new()
            .write_script("echo hi", &path)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo hi");
    }

    #[tokio::test]
    async fn test_overwrites_existing_script() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dotnet-install.sh");
        let writer = FsScriptWriter::new();

        writer.write_script("old", &path).await.unwrap();
        writer.write_script("new", &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dotnet-install.sh");
        FsScriptWriter::new().write_script("echo", &path).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, SCRIPT_MODE);
    }

    #[tokio::test]
    async fn test_failure_is_script_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("install scripts");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = FsScriptWriter::new()
            .write_script("echo", &blocker.join("dotnet-install.sh"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ScriptWrite { .. }));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
