//! JSON-lines logging observer

mod config;
mod formatter;
mod writer;

pub use config::{LoggingConfig, LoggingObserver};

#[cfg(test)]
mod tests;
