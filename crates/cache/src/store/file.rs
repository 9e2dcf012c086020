//! Durable store kept as a single JSON document

use super::{CacheEntry, CacheStore};
use dotnet_acquire_core::{Error, Result};
use dotnet_acquire_utils::write_atomic_string;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, CacheEntry>,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    entries: &'a BTreeMap<String, CacheEntry>,
}

/// Store persisted to one JSON file. Every write rewrites the file through a
/// temporary file and a rename, so a crash leaves either the old or the new
/// document on disk.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, CacheEntry>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a file that
    /// cannot be parsed is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<StoreFile>(&content) {
                Ok(file) if file.version == STORE_FORMAT_VERSION => file.entries,
                Ok(file) => {
                    warn!(
                        path = %path.display(),
                        version = file.version,
                        "Unsupported cache store version, starting empty"
                    );
                    BTreeMap::new()
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Cache store is unreadable, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::file_system(&path, "read cache store", e)),
        };

        debug!(path = %path.display(), entries = entries.len(), "Cache store opened");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every entry, ordered by key
    pub fn entries(&self) -> Vec<(String, CacheEntry)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove every entry; returns how many were removed
    pub fn clear(&self) -> Result<usize> {
        let mut entries = self.entries.write();
        let removed = std::mem::take(&mut *entries);
        if let Err(e) = self.persist(&entries) {
            *entries = removed;
            return Err(e);
        }
        Ok(removed.len())
    }

    fn persist(&self, entries: &BTreeMap<String, CacheEntry>) -> Result<()> {
        let document = StoreFileRef {
            version: STORE_FORMAT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&document)?;
        write_atomic_string(&self.path, &json)?;
        Ok(())
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).map(|e| e.value.clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.to_string(), CacheEntry::new(value));

        if let Err(e) = self.persist(&entries) {
            // Memory must not run ahead of disk
            match previous {
                Some(previous) => {
                    entries.insert(key.to_string(), previous);
                }
                None => {
                    entries.remove(key);
                }
            }
            return Err(Error::cache_write(key, e));
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write();
        let Some(previous) = entries.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }
}
