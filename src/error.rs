//! Error types for veil.
//!
//! Errors are grouped by domain and wrapped by [`Error`]. Only the CLI
//! turns them into user-facing text.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came out of the decryption path.
    ///
    /// These are reported with one generic message so the output never
    /// reveals which check failed.
    pub fn is_decryption(&self) -> bool {
        matches!(
            self,
            Error::Cipher(
                CipherError::HexDecode
                    | CipherError::CiphertextTooShort
                    | CipherError::DecryptionFailed
            )
        )
    }

    /// Whether this error is a problem with the master key itself.
    pub fn is_master_key(&self) -> bool {
        matches!(
            self,
            Error::Config(ConfigError::MissingMasterKey)
                | Error::Cipher(CipherError::InvalidKeyFormat(_) | CipherError::InvalidKeyLength(_))
        )
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MASTER_KEY is not set")]
    MissingMasterKey,

    #[error("unsupported store type: {0}")]
    UnsupportedStore(String),

    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Encryption and decryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid master key format: {0}")]
    InvalidKeyFormat(String),

    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("error decoding hex")]
    HexDecode,

    #[error("ciphertext too short")]
    CiphertextTooShort,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("encryption failed")]
    EncryptionFailed,
}

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret not found: {vault}/{name}")]
    NotFound { vault: String, name: String },

    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database error: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Errors from exporting to and editing `.env` files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("file {0} already exists (use --force to overwrite or --append to add to it)")]
    TargetExists(PathBuf),

    #[error("{0} does not exist")]
    MissingTarget(PathBuf),

    #[error("{key} already exists in {path}, use --force to overwrite")]
    KeyExists { key: String, path: PathBuf },

    #[error("unknown export format '{format}' (available: {known})")]
    UnknownFormat { format: String, known: String },

    #[error("value of {0} contains a line break, which .env files cannot hold")]
    UnsupportedValue(String),

    #[error("'{0}' is not a valid .env key")]
    InvalidKey(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create backup of {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Secret generation errors.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid length {value}: must be between {min} and {max}")]
    InvalidLength { value: usize, min: usize, max: usize },

    #[error("invalid JWT bits {value}: must be between {min} and {max}")]
    InvalidBits { value: u32, min: u32, max: u32 },

    #[error("invalid count {value}: must be between 1 and {max}")]
    InvalidCount { value: usize, max: usize },

    #[error("unknown generator type: {0}")]
    UnknownType(String),

    #[error("unsupported API key format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid batch file: {0}")]
    Batch(String),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
