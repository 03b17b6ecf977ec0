//! Parser for the line-oriented `key=value` files used by every file tier and
//! by suite configuration files.

use std::sync::Arc;

use camino::Utf8Path;

use crate::{SystestError, SystestResult};

/// One `key=value` entry read from a properties file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyLine {
    /// One-based line number in the source file.
    pub line: usize,
    /// Key exactly as written, trimmed.
    pub key: String,
    /// Value as written, trimmed but otherwise untouched.
    pub value: String,
}

/// Parse `contents` read from `path`.
///
/// Blank lines and lines whose first non-blank character is `#` are
/// skipped, and a leading `export ` is tolerated so shell-style env files can
/// be reused. Every malformed line is reported, not only the first.
///
/// # Errors
///
/// Returns [`SystestError::ConfigFile`] (aggregated when several lines are
/// malformed) for lines without `=` or with an empty key.
pub fn parse_properties(path: &Utf8Path, contents: &str) -> SystestResult<Vec<PropertyLine>> {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    for (idx, raw_line) in contents.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let body = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((raw_key, raw_value)) = body.split_once('=') else {
            errors.push(file_error(path, line, "expected `key=value`"));
            continue;
        };
        let key = raw_key.trim();
        if key.is_empty() {
            errors.push(file_error(path, line, "empty key"));
            continue;
        }
        entries.push(PropertyLine {
            line,
            key: key.to_owned(),
            value: raw_value.trim().to_owned(),
        });
    }
    SystestError::check_collected(errors)?;
    Ok(entries)
}

fn file_error(path: &Utf8Path, line: usize, message: &str) -> Arc<SystestError> {
    Arc::new(SystestError::ConfigFile {
        path: path.to_path_buf(),
        line,
        message: message.to_owned(),
    })
}

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}
