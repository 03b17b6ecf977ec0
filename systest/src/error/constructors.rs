//! Shorthand constructors for `SystestError`.

use std::sync::Arc;

use camino::Utf8Path;

use super::{AggregatedErrors, SystestError, SystestResult};
use crate::target::TargetOrigin;

impl SystestError {
    /// Turns errors collected across independent inputs into one result.
    ///
    /// A lone error is returned unchanged; two or more become
    /// [`Self::Aggregate`] in collection order.
    ///
    /// # Errors
    ///
    /// Returns the collected failure when `errors` is not empty.
    pub fn check_collected(mut errors: Vec<Arc<Self>>) -> SystestResult<()> {
        if errors.len() > 1 {
            return Err(Arc::new(Self::Aggregate(Box::new(AggregatedErrors::new(
                errors,
            )))));
        }
        errors.pop().map_or(Ok(()), Err)
    }

    /// Construct an [`SystestError::Io`] for `path`.
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct a [`SystestError::Config`] for `key`.
    #[must_use]
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Config {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Construct a [`SystestError::TargetNotFound`].
    #[must_use]
    pub fn target_not_found(expression: impl Into<String>, origin: &TargetOrigin) -> Arc<Self> {
        Arc::new(Self::TargetNotFound {
            expression: expression.into(),
            origin: origin.clone(),
        })
    }

    /// Construct a [`SystestError::InvalidTarget`].
    #[must_use]
    pub fn invalid_target(
        expression: impl Into<String>,
        origin: &TargetOrigin,
        reason: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::InvalidTarget {
            expression: expression.into(),
            origin: origin.clone(),
            reason: reason.into(),
        })
    }
}
