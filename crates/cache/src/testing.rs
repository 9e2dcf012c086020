//! Fetch doubles shared by tests in this and downstream crates

use crate::fetcher::Fetcher;
use async_trait::async_trait;
use dotnet_acquire_core::FetchError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Reply {
    Body(String),
    Status(u16),
    Network(String),
}

/// Fetcher that answers every request the same way and records what it was asked
pub struct StaticFetcher {
    reply: Reply,
    calls: AtomicUsize,
    uris: Mutex<Vec<String>>,
}

impl StaticFetcher {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            uris: Mutex::new(Vec::new()),
        }
    }

    /// Succeeds with `body` for any non-empty URI
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Body(body.into()))
    }

    /// Answers with a non-success status
    pub fn status(status: u16) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    /// Fails at the transport layer
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Network(message.into()))
    }

    /// Requests that reached the fetcher, including ones with an empty URI
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_uris(&self) -> Vec<String> {
        self.uris.lock().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uris.lock().push(uri.to_string());

        if uri.trim().is_empty() {
            return Err(FetchError::NoUri);
        }

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(FetchError::bad_response(uri, *status)),
            Reply::Network(message) => Err(FetchError::network(
                uri,
                message.clone(),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message.clone()),
            )),
        }
    }
}
