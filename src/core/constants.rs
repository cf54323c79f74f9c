//! Constants used throughout veil.
//!
//! Centralizes magic strings and configuration values.

/// Environment variable holding the hex-encoded master key.
pub const MASTER_KEY_ENV: &str = "MASTER_KEY";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "VEIL_DB_PATH";

/// Environment variable overriding the store backend.
pub const STORE_ENV: &str = "VEIL_STORE";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "VEIL_CONFIG";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "VEIL_LOG";

/// Data directory relative to HOME (~/.veil).
pub const DATA_DIR: &str = ".veil";

/// Database file name inside the data directory.
pub const DB_FILE: &str = "veil.db";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default export target.
pub const ENV_FILE: &str = ".env";

/// Default export format.
pub const DEFAULT_FORMAT: &str = "env";

/// Leading text of the comment written above appended keys.
pub const PROVENANCE_PREFIX: &str = "Added by veil on";
