//! Ephemeral secret generation.
//!
//! Values are generated in memory and handed back to the caller; nothing
//! touches the store and no master key is needed. Results can be shaped
//! with a template or written into a `.env` file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::core::export::{upsert, UpsertOutcome};
use crate::core::generator::{self, GenerateOptions, KeyFormat, SecretKind};
use crate::error::{GenerateError, Result};

/// Upper bound for `count`.
pub const MAX_COUNT: usize = 100;

/// Quick types: the generator kinds plus API key format shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickType {
    #[default]
    Password,
    ApiKey,
    Jwt,
    Hex,
    Base64,
    Uuid,
}

impl QuickType {
    fn kind(self) -> SecretKind {
        match self {
            Self::Password => SecretKind::Password,
            Self::Jwt => SecretKind::Jwt,
            Self::ApiKey | Self::Hex | Self::Base64 | Self::Uuid => SecretKind::ApiKey,
        }
    }

    fn implied_format(self) -> Option<KeyFormat> {
        match self {
            Self::Hex => Some(KeyFormat::Hex),
            Self::Base64 => Some(KeyFormat::Base64),
            Self::Uuid => Some(KeyFormat::Uuid),
            _ => None,
        }
    }
}

impl FromStr for QuickType {
    type Err = GenerateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" | "password" => Ok(Self::Password),
            "apikey" => Ok(Self::ApiKey),
            "jwt" => Ok(Self::Jwt),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "uuid" => Ok(Self::Uuid),
            other => Err(GenerateError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for QuickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Password => "password",
            Self::ApiKey => "apikey",
            Self::Jwt => "jwt",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Uuid => "uuid",
        })
    }
}

/// Options for one quick generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickOptions {
    pub kind: QuickType,
    pub length: Option<usize>,
    /// Overrides the format implied by a shorthand type.
    pub format: Option<KeyFormat>,
    pub prefix: Option<String>,
    pub bits: Option<u32>,
    pub no_symbols: bool,
    pub count: usize,
}

impl Default for QuickOptions {
    fn default() -> Self {
        Self {
            kind: QuickType::default(),
            length: None,
            format: None,
            prefix: None,
            bits: None,
            no_symbols: false,
            count: 1,
        }
    }
}

impl QuickOptions {
    fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            kind: self.kind.kind(),
            length: self.length,
            format: self.format.or(self.kind.implied_format()),
            prefix: self.prefix.clone(),
            bits: self.bits,
            no_symbols: self.no_symbols,
        }
    }
}

/// A generated value and its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickResult {
    /// Type label as requested.
    pub kind: String,
    pub value: String,
    /// Key name, for `.env` output.
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Generate a single value.
///
/// # Errors
///
/// Returns a `GenerateError` for out-of-range options.
pub fn generate_one(opts: &QuickOptions) -> Result<QuickResult> {
    let value = generator::generate(&opts.generate_options())?;
    Ok(QuickResult {
        kind: opts.kind.to_string(),
        value,
        name: None,
        timestamp: Utc::now(),
    })
}

/// Generate `opts.count` values of the same type.
///
/// # Errors
///
/// Returns `GenerateError::InvalidCount` unless `1 <= count <= 100`, or
/// the generator's own errors.
pub fn generate_many(opts: &QuickOptions) -> Result<Vec<QuickResult>> {
    if !(1..=MAX_COUNT).contains(&opts.count) {
        return Err(GenerateError::InvalidCount {
            value: opts.count,
            max: MAX_COUNT,
        }
        .into());
    }

    debug!(kind = %opts.kind, count = opts.count, "quick generation");
    (0..opts.count).map(|_| generate_one(opts)).collect()
}

/// Substitute `{value}`, `{type}` and `{timestamp}` in a template.
pub fn apply_template(template: &str, result: &QuickResult) -> String {
    template
        .replace("{value}", &result.value)
        .replace("{type}", &result.kind)
        .replace(
            "{timestamp}",
            &result.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
}

/// Terminal line for a result: the template if given, otherwise
/// `Generated <type>: <value>`.
pub fn format_output(result: &QuickResult, template: Option<&str>) -> String {
    match template {
        Some(template) if !template.is_empty() => apply_template(template, result),
        _ => format!("Generated {}: {}", result.kind, result.value),
    }
}

/// A JSON batch file: `{"secrets": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub secrets: Vec<BatchSecret>,
}

/// One entry of a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSecret {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bits: Option<u32>,
    #[serde(default)]
    pub no_symbols: bool,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

impl BatchConfig {
    /// Parse a batch file body.
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a batch file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }
}

/// Generate every entry of a batch. Per-entry templates replace the
/// value.
///
/// Every entry is validated before anything is generated.
///
/// # Errors
///
/// Returns `GenerateError::Batch` for an entry without a name, or the
/// type/format/range errors of the offending entry.
pub fn generate_batch(config: &BatchConfig) -> Result<Vec<QuickResult>> {
    let mut planned = Vec::with_capacity(config.secrets.len());

    for (i, secret) in config.secrets.iter().enumerate() {
        if secret.name.trim().is_empty() {
            return Err(GenerateError::Batch(format!("entry {} has no name", i + 1)).into());
        }

        let kind: QuickType = secret.kind.parse()?;
        let format = match secret.format.as_deref() {
            Some(f) if !f.is_empty() => Some(f.parse::<KeyFormat>()?),
            _ => None,
        };

        let opts = QuickOptions {
            kind,
            length: secret.length,
            format,
            prefix: secret.prefix.clone(),
            bits: secret.bits,
            no_symbols: secret.no_symbols,
            count: 1,
        };
        planned.push((secret, opts));
    }

    debug!(entries = planned.len(), "batch generation");

    planned
        .into_iter()
        .map(|(secret, opts)| {
            let mut result = generate_one(&opts)?;
            result.name = Some(secret.name.clone());
            if let Some(template) = secret.template.as_deref().filter(|t| !t.is_empty()) {
                result.value = apply_template(template, &result);
            }
            Ok(result)
        })
        .collect()
}

/// Write named results into a `.env` file, creating it if needed.
///
/// # Errors
///
/// Returns `GenerateError::Batch` if a result has no name, or the
/// errors of [`upsert`].
pub fn write_env(path: &Path, results: &[QuickResult], force: bool) -> Result<Vec<UpsertOutcome>> {
    let pairs = results
        .iter()
        .map(|r| match &r.name {
            Some(name) => Ok((name.clone(), r.value.clone())),
            None => Err(GenerateError::Batch("a key name is required".to_string()).into()),
        })
        .collect::<Result<Vec<_>>>()?;

    upsert(path, &pairs, force, Utc::now())
}
