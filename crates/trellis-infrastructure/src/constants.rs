//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `trellis_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "trellis.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "trellis";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TRELLIS";

/// Separator between nested keys in environment variable names
///
/// `TRELLIS_SERVER__BODY_LIMIT` sets `server.body_limit`.
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "TRELLIS_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used for rolling log files when the path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "trellis";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default bind address
pub const DEFAULT_HTTP_ADDRESS: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default request body limit in bytes (1 MiB)
pub const DEFAULT_BODY_LIMIT: u64 = 1024 * 1024;
