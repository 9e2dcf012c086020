//! Key-value stores backing the fetch worker

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use dotnet_acquire_core::Result;
use serde::{Deserialize, Serialize};

/// Opaque key-value store. A key maps to at most one value; `set` replaces
/// the previous value atomically from the caller's point of view.
///
/// `set` and `remove` may do blocking I/O. Async callers run them on the
/// blocking pool.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Drop the value under `key`; returns whether there was one
    fn remove(&self, key: &str) -> Result<bool>;
}

/// A stored value and when it was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            stored_at: Utc::now(),
        }
    }
}
