//! Classification of raw target expressions.

use super::TargetOrigin;
use super::glob::has_magic;
use crate::{SystestError, SystestResult};

/// The syntactic form of one target expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetExpr<'a> {
    /// `@path`: an indirection file.
    Indirect(&'a str),
    /// A path, optionally followed by `:LINE`.
    Path {
        /// Path or glob pattern.
        path: &'a str,
        /// Line number after the colon.
        line: Option<u32>,
        /// Whether `path` contains glob metacharacters.
        glob: bool,
    },
}

/// Classify `raw`.
///
/// The first `:` separates the path from the line number, which must be a
/// non-negative integer.
///
/// # Errors
///
/// Returns [`SystestError::InvalidTarget`] for an empty `@` reference, an
/// empty path, or a line suffix that is not an integer.
///
/// # Examples
///
/// ```
/// use systest::target::{TargetExpr, TargetOrigin, classify};
///
/// let origin = TargetOrigin::CommandLine;
/// assert_eq!(
///     classify("login/sign_in.feature:12", &origin).unwrap(),
///     TargetExpr::Path { path: "login/sign_in.feature", line: Some(12), glob: false }
/// );
/// assert_eq!(classify("@targets.txt", &origin).unwrap(), TargetExpr::Indirect("targets.txt"));
/// assert!(classify("login/sign_in.feature:twelve", &origin).is_err());
/// ```
pub fn classify<'a>(raw: &'a str, origin: &TargetOrigin) -> SystestResult<TargetExpr<'a>> {
    let expression = raw.trim();
    if let Some(file) = expression.strip_prefix('@') {
        let name = file.trim();
        if name.is_empty() {
            return Err(SystestError::invalid_target(
                raw,
                origin,
                "missing indirection file name after '@'",
            ));
        }
        return Ok(TargetExpr::Indirect(name));
    }
    let (path, line) = match expression.split_once(':') {
        Some((head, suffix)) => (head.trim(), Some(parse_line(raw, suffix.trim(), origin)?)),
        None => (expression, None),
    };
    if path.is_empty() {
        return Err(SystestError::invalid_target(raw, origin, "empty path"));
    }
    Ok(TargetExpr::Path {
        path,
        line,
        glob: has_magic(path),
    })
}

fn parse_line(raw: &str, suffix: &str, origin: &TargetOrigin) -> SystestResult<u32> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SystestError::invalid_target(
            raw,
            origin,
            format!("line number '{suffix}' must be a non-negative integer"),
        ));
    }
    suffix.parse().map_err(|_| {
        SystestError::invalid_target(raw, origin, format!("line number '{suffix}' is too large"))
    })
}
