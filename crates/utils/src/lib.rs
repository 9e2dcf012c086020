//! Shared utilities for dotnet-acquire
//!
//! File system helpers that give all-or-nothing writes, the XDG locations the
//! tool keeps its state in, and tracing initialisation for binaries.

pub mod atomic_file;
pub mod tracing;
pub mod xdg;

pub use atomic_file::*;
pub use xdg::*;
