use dotnet_acquire_core::{AcquisitionConfig, CACHE_FILE_NAME, EVENT_LOG_FILE_NAME};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "dotnet-acquire";

/// XDG Base Directory paths for dotnet-acquire
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_DATA_HOME/dotnet-acquire or fallback
    pub fn data_dir() -> PathBuf {
        Self::base("XDG_DATA_HOME", ".local/share").join(APP_DIR)
    }

    /// Get XDG_STATE_HOME/dotnet-acquire or fallback
    pub fn state_dir() -> PathBuf {
        Self::base("XDG_STATE_HOME", ".local/state").join(APP_DIR)
    }

    /// Get XDG_CACHE_HOME/dotnet-acquire or fallback
    pub fn cache_dir() -> PathBuf {
        Self::base("XDG_CACHE_HOME", ".cache").join(APP_DIR)
    }

    fn base(var: &str, home_relative: &str) -> PathBuf {
        env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|home| home.join(home_relative))
                    .unwrap_or_else(|| PathBuf::from(home_relative))
            })
    }

    /// Default configuration: scripts under the data dir, the response cache
    /// under the cache dir and the event log under the state dir.
    pub fn default_acquisition_config() -> AcquisitionConfig {
        AcquisitionConfig::new(
            Self::data_dir(),
            Self::cache_dir().join(CACHE_FILE_NAME),
            Self::state_dir().join(EVENT_LOG_FILE_NAME),
        )
    }
}
