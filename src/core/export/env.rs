//! `.env` exporter.
//!
//! Files are parsed into typed lines that keep their raw text, so edits
//! only touch the lines they have to. Keys added to an existing file go
//! at the end under a `# Added by veil on <timestamp>` comment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::write::{write_atomic, BackupPolicy};
use super::{ExportOptions, Exporter, Preview, Secrets};
use crate::core::constants;
use crate::error::{ExportError, Result};

/// Quote a value if it would not survive a plain `KEY=value` line.
pub fn escape_value(value: &str) -> String {
    let needs_quotes = value.contains([' ', '\t', '#'])
        || value.trim() != value
        || value.starts_with('"')
        || value.ends_with('"');

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Inverse of [`escape_value`] for the raw text after `=`.
pub fn unescape_value(raw: &str) -> String {
    let raw = raw.trim();
    match raw
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        None => raw.to_string(),
    }
}

pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty()
        || key.contains('=')
        || key.chars().any(char::is_whitespace)
        || key.starts_with('#')
    {
        return Err(ExportError::InvalidKey(key.to_string()).into());
    }
    Ok(())
}

fn check_value(key: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(ExportError::UnsupportedValue(key.to_string()).into());
    }
    Ok(())
}

fn provenance(at: DateTime<Utc>) -> String {
    format!(
        "# {} {}",
        constants::PROVENANCE_PREFIX,
        at.format("%Y-%m-%dT%H:%M:%SZ")
    )
}

/// One physical line of a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EnvLine {
    Blank(String),
    Comment(String),
    Pair {
        raw: String,
        key: String,
        value: String,
    },
    /// Not blank, not a comment, no `=`; kept verbatim.
    Other(String),
}

impl EnvLine {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank(line.to_string());
        }
        if trimmed.starts_with('#') {
            return Self::Comment(line.to_string());
        }

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Self::Pair {
                raw: line.to_string(),
                key: key.trim().to_string(),
                value: unescape_value(value),
            },
            _ => Self::Other(line.to_string()),
        }
    }

    fn pair(key: &str, value: &str) -> Self {
        Self::Pair {
            raw: format!("{}={}", key, escape_value(value)),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn raw(&self) -> &str {
        match self {
            Self::Blank(raw) | Self::Comment(raw) | Self::Other(raw) => raw,
            Self::Pair { raw, .. } => raw,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }
}

/// A `.env` file as an ordered list of lines.
///
/// The line terminator of the first line (`\n` or `\r\n`) is used for
/// every line on render; files mixing both come back uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDocument {
    lines: Vec<EnvLine>,
    newline: &'static str,
}

impl Default for EnvDocument {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            newline: "\n",
        }
    }
}

impl EnvDocument {
    /// Parse file contents.
    pub fn parse(contents: &str) -> Self {
        let newline = match contents.find('\n') {
            Some(i) if contents[..i].ends_with('\r') => "\r\n",
            _ => "\n",
        };
        Self {
            lines: contents.lines().map(EnvLine::parse).collect(),
            newline,
        }
    }

    /// Read and parse a file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Read` naming `path` if the file cannot be
    /// read or is not UTF-8.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Value of `key`; the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            EnvLine::Pair { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Every key with its effective value.
    pub fn values(&self) -> HashMap<&str, &str> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                EnvLine::Pair { key, value, .. } => Some((key.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Whether any line defines `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Replace the value of every occurrence of `key`.
    ///
    /// The text up to and including `=`, plus any whitespace after it, is
    /// kept. Returns the number of lines rewritten.
    pub fn set(&mut self, key: &str, value: &str) -> usize {
        let mut rewritten = 0;

        for line in &mut self.lines {
            if let EnvLine::Pair {
                raw,
                key: k,
                value: v,
            } = line
            {
                if k.as_str() != key {
                    continue;
                }
                let Some(eq) = raw.find('=') else { continue };
                let after = &raw[eq + 1..];
                let keep = eq + 1 + (after.len() - after.trim_start().len());

                *raw = format!("{}{}", &raw[..keep], escape_value(value));
                *v = value.to_string();
                rewritten += 1;
            }
        }

        rewritten
    }

    /// Append `pairs` under a provenance comment, separated from existing
    /// content by one blank line.
    pub fn append_block<'a>(
        &mut self,
        at: DateTime<Utc>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return;
        }

        if self.lines.last().is_some_and(|line| !line.is_blank()) {
            self.lines.push(EnvLine::Blank(String::new()));
        }
        self.lines.push(EnvLine::Comment(provenance(at)));
        self.lines
            .extend(pairs.map(|(key, value)| EnvLine::pair(key, value)));
    }

    /// Render back to text, every line terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line.raw());
            out.push_str(self.newline);
        }
        out
    }
}

/// Exporter for `KEY=value` files.
pub struct EnvExporter {
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl EnvExporter {
    /// An exporter stamping provenance comments with the current time.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// An exporter with a custom time source.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl Default for EnvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for EnvExporter {
    fn format(&self) -> &'static str {
        "env"
    }

    fn preview(&self, secrets: &Secrets, opts: &ExportOptions) -> Result<Preview> {
        for (key, value) in secrets {
            check_key(key)?;
            check_value(key, value)?;
        }

        let existing = if opts.append && opts.path.exists() {
            Some(EnvDocument::read(&opts.path)?)
        } else {
            None
        };

        let mut preview = Preview::default();
        for (key, value) in secrets {
            match existing.as_ref().and_then(|doc| doc.get(key)) {
                None => preview.new.push(key.clone()),
                Some(current) if current == value => preview.skipped.push(key.clone()),
                Some(_) if opts.force => preview.updated.push(key.clone()),
                Some(_) => preview.skipped.push(key.clone()),
            }
        }

        preview.content = match existing {
            Some(mut doc) => {
                for key in &preview.updated {
                    doc.set(key, &secrets[key]);
                }
                doc.append_block(
                    self.now(),
                    preview
                        .new
                        .iter()
                        .map(|key| (key.as_str(), secrets[key].as_str())),
                );
                preview.edit = true;
                doc.render()
            }
            None => {
                let mut keys: Vec<&String> =
                    preview.new.iter().chain(&preview.updated).collect();
                keys.sort();
                keys.iter()
                    .map(|key| format!("{}={}\n", key, escape_value(&secrets[*key])))
                    .collect()
            }
        };

        Ok(preview)
    }

    fn commit(&self, preview: &Preview, opts: &ExportOptions) -> Result<()> {
        opts.check_target()?;

        if preview.edit && !preview.has_changes() {
            debug!(path = %opts.path.display(), "nothing to write");
            return Ok(());
        }

        let policy = opts.backup.then(|| BackupPolicy {
            dir: opts.backup_dir.as_deref(),
            at: self.now(),
        });
        write_atomic(&opts.path, &preview.content, policy.as_ref())?;
        Ok(())
    }
}

/// What happened to one key during [`upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended in a provenance block.
    Added,
    /// Rewritten in place.
    Updated,
    /// Already present and `force` was not set.
    Skipped,
}

/// Write individual keys into a `.env` file, creating it if needed.
///
/// Absent keys are appended in one provenance block; present keys are
/// rewritten in place with `force` and left alone without it. The file is
/// only written when something changed.
///
/// # Errors
///
/// Returns `ExportError::InvalidKey`/`ExportError::UnsupportedValue` for
/// unrepresentable pairs, or I/O errors from reading and writing.
pub fn upsert(
    path: &Path,
    pairs: &[(String, String)],
    force: bool,
    at: DateTime<Utc>,
) -> Result<Vec<UpsertOutcome>> {
    for (key, value) in pairs {
        check_key(key)?;
        check_value(key, value)?;
    }

    let mut doc = if path.exists() {
        EnvDocument::read(path)?
    } else {
        EnvDocument::default()
    };

    let mut outcomes = Vec::with_capacity(pairs.len());
    let mut added: Vec<(&str, &str)> = Vec::new();

    for (key, value) in pairs {
        let outcome = if added.iter().any(|(k, _)| *k == key.as_str()) {
            added.retain(|(k, _)| *k != key.as_str());
            added.push((key.as_str(), value.as_str()));
            UpsertOutcome::Added
        } else if !doc.contains(key) {
            added.push((key.as_str(), value.as_str()));
            UpsertOutcome::Added
        } else if force {
            doc.set(key, value);
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Skipped
        };
        outcomes.push(outcome);
    }

    let changed = !added.is_empty() || outcomes.contains(&UpsertOutcome::Updated);
    doc.append_block(at, added);

    if changed {
        debug!(path = %path.display(), keys = pairs.len(), "upserting env keys");
        write_atomic(path, &doc.render(), None)?;
    }

    Ok(outcomes)
}
