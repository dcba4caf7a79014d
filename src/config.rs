//! Card configuration: a flat `KEY=VALUE` lookup.
//!
//! The config file is deliberately loose. Every non-comment line is a single
//! `KEY=VALUE` directive, and keys are matched case-insensitively:
//!
//! ```text
//! # Card back used for every card
//! CARD_BACK=back.png
//!
//! # Quantity overrides, by file stem or full file name
//! hero=3
//! villain.jpg=2
//! ```
//!
//! ## Recognized Keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `CARD_BACK` | File name of the card back image inside the card directory |
//! | *stem or file name* | Print quantity for that card (see [`crate::quantity`]) |
//!
//! ## Leniency
//!
//! Malformed lines never fail the load. They are logged, kept as
//! [`ConfigWarning`]s for the run summary, and skipped. A missing config file
//! behaves exactly like no config at all.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Key naming the card back file.
pub const CARD_BACK_KEY: &str = "CARD_BACK";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A config line that was rejected during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub line: String,
}

/// Read-only, case-insensitive key/value lookup.
///
/// Keys are uppercased on the way in and on the way out, so callers never
/// have to think about case.
#[derive(Debug, Clone, Default)]
pub struct OrderConfig {
    entries: HashMap<String, String>,
    warnings: Vec<ConfigWarning>,
}

impl OrderConfig {
    /// Build a lookup from raw lines. Later duplicates overwrite earlier ones.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for (idx, line) in lines.into_iter().enumerate() {
            config.read_line(idx + 1, line.as_ref());
        }
        config
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Load a config file.
    ///
    /// A path that does not exist yields `Ok(None)` after logging a warning.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            tracing::warn!("Config file {} not found, continuing without one", path.display());
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text);
        tracing::debug!(
            "Loaded {} config entries from {}",
            config.len(),
            path.display()
        );
        Ok(Some(config))
    }

    fn read_line(&mut self, line_number: usize, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        match split_directive(trimmed) {
            Some((key, value)) => {
                self.entries.insert(normalize_key(key), value.to_string());
            }
            None => {
                tracing::warn!("Failed to parse config line {line_number}: {line}");
                self.warnings.push(ConfigWarning {
                    line_number,
                    line: line.to_string(),
                });
            }
        }
    }

    /// Look up a value. The key is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// The configured card back file name, if any.
    pub fn card_back(&self) -> Option<&str> {
        self.get(CARD_BACK_KEY)
    }

    /// Lines rejected while parsing, in source order.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Split `KEY=VALUE` on its only `=`. The value must be non-empty after trimming; the key may be empty.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    let key = parts.next()?.trim();
    let value = parts.next()?.trim();
    if parts.next().is_some() || value.is_empty() {
        return None;
    }
    Some((key, value))
}
