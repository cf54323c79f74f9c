//! Runtime configuration.
//!
//! Settings come from an optional TOML file (`~/.veil/config.toml`, or the
//! path in `VEIL_CONFIG`) and are overridden by environment variables:
//!
//! - `MASTER_KEY`: hex-encoded 32-byte master key
//! - `VEIL_DB_PATH`: database location
//! - `VEIL_STORE`: store backend (`sqlite`)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Supported storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(ConfigError::UnsupportedStore(other.to_string())),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Contents of the optional config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Database location.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Store backend name.
    #[serde(default)]
    pub store: Option<String>,
}

impl FileConfig {
    /// Parse a config file body.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }
}

/// Resolved configuration.
#[derive(Clone)]
pub struct Config {
    db_path: PathBuf,
    store: StoreKind,
    master_key: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .field("store", &self.store)
            .field("master_key", &self.master_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from the config file and process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if no home directory can be found,
    /// `ConfigError::ReadFile`/`ConfigError::Parse` for a bad config file,
    /// or `ConfigError::UnsupportedStore` for an unknown backend.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(constants::CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => data_dir()?.join(constants::CONFIG_FILE),
        };

        let file = if path.exists() {
            debug!(path = %path.display(), "reading config file");
            let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
            FileConfig::parse(&contents)?
        } else {
            FileConfig::default()
        };

        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Build a configuration from a parsed file and an environment lookup.
    ///
    /// Environment values win over file values; empty values are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus file access.
    pub fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let db_path = match env(constants::DB_PATH_ENV).map(PathBuf::from).or(file.db_path) {
            Some(path) => path,
            None => data_dir()?.join(constants::DB_FILE),
        };

        let store = match env(constants::STORE_ENV).or(file.store) {
            Some(name) => name.parse()?,
            None => StoreKind::default(),
        };

        let master_key = env(constants::MASTER_KEY_ENV).map(|k| Zeroizing::new(k.trim().to_string()));

        debug!(
            db_path = %db_path.display(),
            store = %store,
            master_key = master_key.is_some(),
            "config resolved"
        );

        Ok(Self {
            db_path,
            store,
            master_key,
        })
    }

    /// Database location.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Selected store backend.
    pub fn store(&self) -> StoreKind {
        self.store
    }

    /// The hex-encoded master key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingMasterKey` if `MASTER_KEY` is unset.
    pub fn master_key(&self) -> Result<&str> {
        self.master_key
            .as_ref()
            .map(|k| k.as_str())
            .ok_or_else(|| ConfigError::MissingMasterKey.into())
    }
}

/// `~/.veil`
fn data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(constants::DATA_DIR))
        .ok_or_else(|| ConfigError::NoHomeDir.into())
}
