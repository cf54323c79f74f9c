//! Secret value generators.
//!
//! Every generator draws from the OS random number generator. Options
//! are validated before any randomness is consumed.

use std::fmt;
use std::str::FromStr;

use crate::error::{GenerateError, Result};

mod apikey;
mod jwt;
mod password;

pub use apikey::ApiKeyGenerator;
pub use jwt::JwtGenerator;
pub use password::PasswordGenerator;

/// What kind of secret to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretKind {
    #[default]
    Password,
    ApiKey,
    Jwt,
}

impl FromStr for SecretKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" | "password" => Ok(Self::Password),
            "apikey" => Ok(Self::ApiKey),
            "jwt" => Ok(Self::Jwt),
            other => Err(GenerateError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Password => "password",
            Self::ApiKey => "apikey",
            Self::Jwt => "jwt",
        })
    }
}

/// Encoding of generated API keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFormat {
    /// URL-safe base64 with padding.
    #[default]
    Base64,
    Hex,
    /// Random (v4) UUID.
    Uuid,
    /// Time-ordered (v7) UUID.
    UuidV7,
}

impl FromStr for KeyFormat {
    type Err = GenerateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" | "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            "uuid" => Ok(Self::Uuid),
            "uuidv7" => Ok(Self::UuidV7),
            other => Err(GenerateError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base64 => "base64",
            Self::Hex => "hex",
            Self::Uuid => "uuid",
            Self::UuidV7 => "uuidv7",
        })
    }
}

/// Generation parameters. Unset fields fall back to per-kind defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub kind: SecretKind,
    /// Password characters or API key random bytes.
    pub length: Option<usize>,
    pub format: Option<KeyFormat>,
    /// Prepended to API keys.
    pub prefix: Option<String>,
    /// JWT secret strength.
    pub bits: Option<u32>,
    /// Passwords from letters and digits only.
    pub no_symbols: bool,
}

/// Produces one secret value.
pub trait Generator {
    /// # Errors
    ///
    /// Returns a `GenerateError` if the options are out of range.
    fn generate(&self, opts: &GenerateOptions) -> Result<String>;
}

/// The generator for a kind.
pub fn generator_for(kind: SecretKind) -> &'static dyn Generator {
    match kind {
        SecretKind::Password => &PasswordGenerator,
        SecretKind::ApiKey => &ApiKeyGenerator,
        SecretKind::Jwt => &JwtGenerator,
    }
}

/// Generate a value as described by `opts`.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate(opts: &GenerateOptions) -> Result<String> {
    generator_for(opts.kind).generate(opts)
}

fn check_length(value: usize, min: usize, max: usize) -> Result<usize> {
    if !(min..=max).contains(&value) {
        return Err(GenerateError::InvalidLength { value, min, max }.into());
    }
    Ok(value)
}
