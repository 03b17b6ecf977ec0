//! Framework version checks for suites.

use std::borrow::Cow;

use semver::{Version, VersionReq};
use tracing::debug;

use super::Suite;
use crate::{SystestError, SystestResult, VERSION};

/// Verifies that the running framework satisfies a suite's declared version.
///
/// A bare declaration such as `1.2` is a minimum, read as `>=1.2`. Explicit
/// operators (`>=1.0, <2`, `^1.2`) are honoured as written.
///
/// # Examples
///
/// ```
/// use systest::suite::CompatibilityChecker;
///
/// let checker = CompatibilityChecker::with_version("1.4.2");
/// assert!(checker.check_requirement("demo", Some("1.2")).is_ok());
/// assert!(checker.check_requirement("demo", Some("0.9")).is_ok());
/// assert!(checker.check_requirement("demo", Some("2.0")).is_err());
/// assert!(checker.check_requirement("demo", None).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CompatibilityChecker {
    running: String,
}

impl Default for CompatibilityChecker {
    fn default() -> Self {
        Self::with_version(VERSION)
    }
}

impl CompatibilityChecker {
    /// Checker comparing against an explicit running version.
    #[must_use]
    pub fn with_version(running: impl Into<String>) -> Self {
        Self {
            running: running.into(),
        }
    }

    /// Version the checker compares against.
    #[must_use]
    pub fn running(&self) -> &str {
        &self.running
    }

    /// Check `suite`'s declared framework version.
    ///
    /// # Errors
    ///
    /// Returns [`SystestError::Compatibility`] when the declaration cannot be
    /// parsed or is not satisfied.
    pub fn check(&self, suite: &Suite) -> SystestResult<()> {
        self.check_requirement(suite.name(), suite.framework_version())
    }

    /// Check a raw `declared` requirement for the suite called `suite`.
    ///
    /// # Errors
    ///
    /// See [`Self::check`].
    pub fn check_requirement(&self, suite: &str, declared: Option<&str>) -> SystestResult<()> {
        let Some(required) = declared.map(str::trim).filter(|req| !req.is_empty()) else {
            debug!(suite, "no framework version declared");
            return Ok(());
        };
        let satisfied = VersionReq::parse(&as_requirement(required))
            .ok()
            .zip(Version::parse(&self.running).ok())
            .is_some_and(|(req, running)| req.matches(&running));
        if satisfied {
            debug!(suite, required, running = %self.running, "framework version accepted");
            Ok(())
        } else {
            Err(std::sync::Arc::new(SystestError::Compatibility {
                suite: suite.to_owned(),
                required: required.to_owned(),
                running: self.running.clone(),
            }))
        }
    }
}

/// Bare versions become `>=` requirements; anything with an operator,
/// wildcard or comparator list is left alone.
fn as_requirement(declared: &str) -> Cow<'_, str> {
    let bare = declared.starts_with(|ch: char| ch.is_ascii_digit())
        && !declared.contains([',', '*', 'x', 'X']);
    if bare {
        Cow::Owned(format!(">={declared}"))
    } else {
        Cow::Borrowed(declared)
    }
}
