//! Indirection files: plain text lists of target expressions.

use camino::{Utf8Path, Utf8PathBuf};

use super::TargetOrigin;
use crate::{IoResultExt, SystestError, SystestResult};

/// One expression read from an indirection file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AtEntry {
    /// One-based line number in the file.
    pub line: usize,
    /// The expression, trimmed.
    pub expression: String,
}

/// A parsed indirection file.
///
/// Blank lines and lines starting with `#` are dropped; every other line is
/// one target expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AtFile {
    path: Utf8PathBuf,
    entries: Vec<AtEntry>,
}

impl AtFile {
    /// Parse `contents` read from `path`.
    #[must_use]
    pub fn parse(path: impl Into<Utf8PathBuf>, contents: &str) -> Self {
        let entries = contents
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let trimmed = raw.trim();
                (!trimmed.is_empty() && !trimmed.starts_with('#')).then(|| AtEntry {
                    line: idx + 1,
                    expression: trimmed.to_owned(),
                })
            })
            .collect();
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Read and parse the file at `path`.
    ///
    /// `expression` and `origin` describe where the reference was written
    /// and are used when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SystestError::TargetNotFound`] when `path` is not a file,
    /// and an I/O error when it cannot be read.
    pub fn read(path: &Utf8Path, expression: &str, origin: &TargetOrigin) -> SystestResult<Self> {
        if !path.is_file() {
            return Err(SystestError::target_not_found(expression, origin));
        }
        let contents = std::fs::read_to_string(path).with_path(path)?;
        Ok(Self::parse(path, &contents))
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Target expressions in file order.
    #[must_use]
    pub fn entries(&self) -> &[AtEntry] {
        &self.entries
    }

    /// Origin to attribute to `entry`.
    #[must_use]
    pub fn origin_of(&self, entry: &AtEntry) -> TargetOrigin {
        TargetOrigin::AtFile {
            path: self.path.clone(),
            line: entry.line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines_keeping_line_numbers() {
        let file = AtFile::parse(
            "targets.txt",
            "# nightly selection\n\nlogin\n   # indented comment\n  signup/new.feature:4  \n",
        );
        assert_eq!(
            file.entries(),
            [
                AtEntry {
                    line: 3,
                    expression: "login".into()
                },
                AtEntry {
                    line: 5,
                    expression: "signup/new.feature:4".into()
                },
            ]
        );
    }

    #[test]
    fn missing_file_is_target_not_found() {
        let err = AtFile::read(
            Utf8Path::new("/definitely/not/here.txt"),
            "@/definitely/not/here.txt",
            &TargetOrigin::CommandLine,
        )
        .expect_err("missing");
        assert!(matches!(err.as_ref(), SystestError::TargetNotFound { .. }));
    }
}
