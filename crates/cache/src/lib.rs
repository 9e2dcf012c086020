//! Persistent response cache and the cache-first fetch worker

pub mod fetcher;
pub mod store;
pub mod testing;
pub mod worker;

pub use fetcher::{Fetcher, HttpFetcher};
pub use store::{CacheEntry, CacheStore, FileStore, MemoryStore};
pub use worker::{CachedFetchWorker, FetchRequest};
