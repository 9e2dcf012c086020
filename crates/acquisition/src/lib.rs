//! Acquisition of the dotnet install script and the release channel index
//!
//! Both workers sit on top of [`CachedFetchWorker`](dotnet_acquire_cache::CachedFetchWorker)
//! and report their outcome on the event stream: one completion or one error
//! event per call.

pub mod install_script;
pub mod platform;
pub mod releases;
pub mod writer;

pub use install_script::InstallScriptAcquisitionWorker;
pub use platform::Platform;
pub use releases::{ReleaseChannel, ReleaseManifestWorker, ReleasesIndex};
pub use writer::{FsScriptWriter, ScriptWriter};
