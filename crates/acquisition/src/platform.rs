use dotnet_acquire_core::{UNIX_SCRIPT_EXTENSION, WINDOWS_SCRIPT_EXTENSION};
use std::fmt;

/// Script flavour to acquire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn script_extension(self) -> &'static str {
        match self {
            Platform::Windows => WINDOWS_SCRIPT_EXTENSION,
            Platform::Unix => UNIX_SCRIPT_EXTENSION,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::Unix => f.write_str("unix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_extension() {
        assert_eq!(Platform::Windows.script_extension(), ".ps1");
        assert_eq!(Platform::Unix.script_extension(), ".sh");
    }

    #[test]
    fn test_current_matches_target() {
        #[cfg(windows)]
        assert_eq!(Platform::current(), Platform::Windows);
        #[cfg(not(windows))]
        assert_eq!(Platform::current(), Platform::Unix);
    }
}
