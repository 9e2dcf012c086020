/// Constants used throughout the dotnet-acquire codebase
// Identity reported to telemetry
pub const DEFAULT_EXTENSION_ID: &str = "dotnet-acquire";
pub const DEFAULT_EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

// Remote endpoints
pub const DEFAULT_SCRIPT_BASE_URL: &str = "https://dot.net/v1/dotnet-install";
pub const DEFAULT_RELEASES_URL: &str =
    "https://dotnetcli.blob.core.windows.net/dotnet/release-metadata/releases-index.json";

// Cache keys. These name the logical resource, never the URI it came from.
pub const INSTALL_SCRIPT_CACHE_KEY: &str = "dotnet-install";
pub const RELEASES_CACHE_KEY: &str = "releases";

// Install script layout
pub const INSTALL_SCRIPT_FILE_STEM: &str = "dotnet-install";
pub const INSTALL_SCRIPTS_DIR: &str = "install scripts";
pub const WINDOWS_SCRIPT_EXTENSION: &str = ".ps1";
pub const UNIX_SCRIPT_EXTENSION: &str = ".sh";

// Persistent file names
pub const CACHE_FILE_NAME: &str = "cache.json";
pub const EVENT_LOG_FILE_NAME: &str = "events.jsonl";

// Network defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("dotnet-acquire/", env!("CARGO_PKG_VERSION"));

// Event stream
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;

// Environment variable names
pub const DOTNET_ACQUIRE_LOG_VAR: &str = "DOTNET_ACQUIRE_LOG";
pub const DOTNET_ACQUIRE_SCRIPT_URL_VAR: &str = "DOTNET_ACQUIRE_SCRIPT_URL";
pub const DOTNET_ACQUIRE_RELEASES_URL_VAR: &str = "DOTNET_ACQUIRE_RELEASES_URL";
pub const DOTNET_ACQUIRE_INSTALL_ROOT_VAR: &str = "DOTNET_ACQUIRE_INSTALL_ROOT";
pub const DOTNET_ACQUIRE_CACHE_FILE_VAR: &str = "DOTNET_ACQUIRE_CACHE_FILE";
pub const DOTNET_ACQUIRE_LOG_FILE_VAR: &str = "DOTNET_ACQUIRE_LOG_FILE";
pub const DOTNET_ACQUIRE_TELEMETRY_KEY_VAR: &str = "DOTNET_ACQUIRE_TELEMETRY_KEY";
pub const DOTNET_ACQUIRE_HTTP_TIMEOUT_VAR: &str = "DOTNET_ACQUIRE_HTTP_TIMEOUT_SECS";
