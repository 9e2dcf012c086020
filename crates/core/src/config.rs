//! Acquisition configuration
//!
//! `AcquisitionConfig` is built once at startup and handed to every worker.
//! Nothing in the workspace reads package metadata or ambient state on its
//! own; identity, endpoints and locations all arrive through this struct.

use crate::constants::*;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Immutable settings shared by the acquisition workers and observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// Identifier reported to telemetry
    pub extension_id: String,

    /// Version reported to telemetry
    pub extension_version: String,

    /// Telemetry instrumentation key; `None` disables the telemetry tag
    pub telemetry_key: Option<String>,

    /// Directory under which `install scripts/` is created
    pub install_root: PathBuf,

    /// Persistent cache store file
    pub cache_file: PathBuf,

    /// JSON-lines event log
    pub log_file: PathBuf,

    /// Base address of the install script; the platform extension is appended.
    /// Empty disables fetching.
    pub script_base_url: String,

    /// Address of the release channel index. Empty disables fetching.
    pub releases_url: String,

    /// Client-level timeout applied by the HTTP fetcher
    pub http_timeout: Duration,
}

impl AcquisitionConfig {
    /// Create a configuration rooted at the given locations with default
    /// identity and endpoints.
    pub fn new(
        install_root: impl Into<PathBuf>,
        cache_file: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extension_id: DEFAULT_EXTENSION_ID.to_string(),
            extension_version: DEFAULT_EXTENSION_VERSION.to_string(),
            telemetry_key: None,
            install_root: install_root.into(),
            cache_file: cache_file.into(),
            log_file: log_file.into(),
            script_base_url: DEFAULT_SCRIPT_BASE_URL.to_string(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Create a configuration with every file placed under one directory.
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(
            root,
            root.join(CACHE_FILE_NAME),
            root.join(EVENT_LOG_FILE_NAME),
        )
    }

    pub fn with_identity(
        mut self,
        extension_id: impl Into<String>,
        extension_version: impl Into<String>,
    ) -> Self {
        self.extension_id = extension_id.into();
        self.extension_version = extension_version.into();
        self
    }

    pub fn with_telemetry_key(mut self, telemetry_key: Option<String>) -> Self {
        self.telemetry_key = telemetry_key;
        self
    }

    pub fn with_install_root(mut self, install_root: impl Into<PathBuf>) -> Self {
        self.install_root = install_root.into();
        self
    }

    pub fn with_cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = cache_file.into();
        self
    }

    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    pub fn with_script_base_url(mut self, url: impl Into<String>) -> Self {
        self.script_base_url = url.into();
        self
    }

    pub fn with_releases_url(mut self, url: impl Into<String>) -> Self {
        self.releases_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Apply `DOTNET_ACQUIRE_*` overrides from the process environment.
    ///
    /// A variable that is set but empty still overrides: an empty URL is the
    /// "fetch disabled" sentinel.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup, keyed by the same variable names.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DOTNET_ACQUIRE_SCRIPT_URL_VAR) {
            self.script_base_url = url;
        }
        if let Some(url) = lookup(DOTNET_ACQUIRE_RELEASES_URL_VAR) {
            self.releases_url = url;
        }
        if let Some(root) = non_empty(lookup(DOTNET_ACQUIRE_INSTALL_ROOT_VAR)) {
            self.install_root = PathBuf::from(root);
        }
        if let Some(file) = non_empty(lookup(DOTNET_ACQUIRE_CACHE_FILE_VAR)) {
            self.cache_file = PathBuf::from(file);
        }
        if let Some(file) = non_empty(lookup(DOTNET_ACQUIRE_LOG_FILE_VAR)) {
            self.log_file = PathBuf::from(file);
        }
        if let Some(key) = lookup(DOTNET_ACQUIRE_TELEMETRY_KEY_VAR) {
            self.telemetry_key = non_empty(Some(key));
        }
        if let Some(secs) = non_empty(lookup(DOTNET_ACQUIRE_HTTP_TIMEOUT_VAR)) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                Error::configuration(format!(
                    "{DOTNET_ACQUIRE_HTTP_TIMEOUT_VAR} must be a whole number of seconds, got '{secs}': {e}"
                ))
            })?;
            if secs == 0 {
                return Err(Error::configuration(format!(
                    "{DOTNET_ACQUIRE_HTTP_TIMEOUT_VAR} must be greater than zero"
                )));
            }
            self.http_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Directory the install script is written into
    pub fn install_scripts_dir(&self) -> PathBuf {
        self.install_root.join(INSTALL_SCRIPTS_DIR)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
