// src/properties.rs

//! Build properties and the flat `key=value` document format.
//!
//! - [`PropertySource`] answers "is this flag set?" the way a Gradle build
//!   answers `hasProperty`: presence matters, the value usually does not.
//! - [`PropertiesDocument`] is a line-preserving reader/writer for
//!   `.properties`-style files such as the version record.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{RelkitError, Result};

/// Disables the pre-release dependency bundle on `generate*ReleaseBuildConfig`.
pub const IGNORE_CHECKS: &str = "ignoreChecks";
/// Forces the version-code timestamp to `1`.
pub const DEV_BUILD: &str = "devBuild";
/// Reserved release output directory. Recognised, currently without effect.
pub const APK_PATH: &str = "apkPath";
/// Start reference for the generic changelog.
pub const CHANGELOG_SINCE: &str = "changelogSince";

/// Read-only set of build properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySource {
    values: BTreeMap<String, String>,
}

impl PropertySource {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Merge the config-file properties with CLI flags of the form `key` or
    /// `key=value`. Flags win over the config file.
    pub fn from_config_and_flags(
        config: &BTreeMap<String, String>,
        flags: &[String],
    ) -> Result<Self> {
        let mut values = config.clone();

        for flag in flags {
            let (key, value) = match flag.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (flag.trim(), ""),
            };
            if key.is_empty() {
                return Err(RelkitError::ConfigError(format!(
                    "invalid property flag '{flag}' (expected KEY or KEY=VALUE)"
                )));
            }
            debug!(property = %key, "property set from command line");
            values.insert(key.to_string(), value.to_string());
        }

        Ok(Self { values })
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// `raw` holds the original text until the value is changed by `set`.
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
    Verbatim(String),
}

/// A `.properties` document that keeps comments, blank lines and unknown
/// keys intact across a read-modify-write cycle.
///
/// Keys end at the first unescaped `=`, `:` or whitespace. When a key is
/// repeated the last entry wins, for reads and writes alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesDocument {
    lines: Vec<Line>,
}

impl PropertiesDocument {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|raw| {
                let trimmed = raw.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    return Line::Verbatim(raw.to_string());
                }
                let (key, value) = split_entry(trimmed);
                Line::Entry {
                    key,
                    value,
                    raw: Some(raw.to_string()),
                }
            })
            .collect();

        Self { lines }
    }

    /// Value of the last entry named `key`, with surrounding whitespace
    /// trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.trim()),
            _ => None,
        })
    }

    /// Replace the value of the last entry named `key`, or append a new
    /// entry if it is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for line in self.lines.iter_mut().rev() {
            if let Line::Entry {
                key: k,
                value: v,
                raw,
            } = line
            {
                if k == key {
                    *v = value;
                    *raw = None;
                    return;
                }
            }
        }
        self.lines.push(Line::Entry {
            key: key.to_string(),
            value,
            raw: None,
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry {
                    raw: Some(raw), ..
                }
                | Line::Verbatim(raw) => out.push_str(raw),
                Line::Entry {
                    key,
                    value,
                    raw: None,
                } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Split a non-comment line (leading whitespace removed) into key and value.
fn split_entry(line: &str) -> (String, String) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if c.is_whitespace() => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = line[..key_end].to_string();
    let mut rest = line[key_end..].trim_start();
    // A whitespace separator may still be followed by one `=` or `:`.
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped;
    }
    (key, rest.to_string())
}
