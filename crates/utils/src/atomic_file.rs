//! Atomic file operations so readers never observe a half-written file

use dotnet_acquire_core::Error;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A step of an atomic write failed. No temporary file is left behind and the
/// destination, if it existed, is unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed for '{}': {source}", .path.display())]
pub struct AtomicWriteError {
    pub path: PathBuf,
    pub operation: &'static str,
    #[source]
    pub source: io::Error,
}

impl AtomicWriteError {
    fn new(path: &Path, operation: &'static str, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }

    /// Report the failure as an install script write error
    pub fn into_script_write(self) -> Error {
        Error::script_write(self.path, self.operation, self.source)
    }
}

impl From<AtomicWriteError> for Error {
    fn from(error: AtomicWriteError) -> Self {
        Error::file_system(error.path, error.operation, error.source)
    }
}

/// Write data to a file atomically by writing to a temporary file and renaming.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), AtomicWriteError> {
    write_atomic_with_mode(path, content, None)
}

/// Like [`write_atomic`], but applies `mode` to the temporary file before the
/// rename so the destination appears with its final permissions.
///
/// On non-Unix platforms the mode only clears the read-only flag.
pub fn write_atomic_with_mode(
    path: &Path,
    content: &[u8],
    mode: Option<u32>,
) -> Result<(), AtomicWriteError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)
        .map_err(|e| AtomicWriteError::new(parent, "create directory", e))?;

    // Same directory as the destination so the rename stays on one file system
    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4()));

    let result = (|| -> Result<(), AtomicWriteError> {
        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp_path)
            .map_err(|e| AtomicWriteError::new(&temp_path, "create temporary file", e))?;

        file.write_all(content)
            .map_err(|e| AtomicWriteError::new(&temp_path, "write", e))?;

        file.sync_all()
            .map_err(|e| AtomicWriteError::new(&temp_path, "sync", e))?;

        if let Some(mode) = mode {
            set_mode(&temp_path, mode)
                .map_err(|e| AtomicWriteError::new(&temp_path, "set permissions", e))?;
        }

        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
        return result;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AtomicWriteError::new(path, "rename", e)
    })
}

/// Write string content to a file atomically
pub fn write_atomic_string(path: &Path, content: &str) -> Result<(), AtomicWriteError> {
    write_atomic(path, content.as_bytes())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn set_mode(path: &Path, _mode: u32) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
