//! Primary error enum for the resolution pipeline.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::config::Tier;
use crate::suite::Violations;
use crate::target::TargetOrigin;

/// Errors that abort a resolution attempt.
///
/// Every variant is fatal to the current invocation; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SystestError {
    /// A multi-valued setting contained malformed shell quoting.
    #[error("cannot split value {raw:?} from the {tier}: unterminated quote")]
    Parse {
        /// Raw value as it appeared in the source.
        raw: String,
        /// Tier the value was read from.
        tier: Tier,
    },

    /// A configuration file is present but malformed.
    #[error("configuration file error in '{path}' at line {line}: {message}")]
    ConfigFile {
        /// File containing the malformed entry.
        path: Utf8PathBuf,
        /// One-based line number of the entry.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// A configuration key was used in a way its declaration forbids.
    #[error("invalid configuration for '{key}': {message}")]
    Config {
        /// Key that triggered the failure.
        key: String,
        /// Human-readable explanation.
        message: String,
    },

    /// The suite directory does not have the mandatory shape.
    #[error("test suite '{suite}' is not valid:\n{violations}")]
    Structure {
        /// Suite name as requested.
        suite: String,
        /// Every violation found during validation.
        violations: Violations,
    },

    /// The suite requires a framework version the running binary cannot satisfy.
    #[error(
        "test suite '{suite}' requires framework version {required}, \
         but the running version is {running}"
    )]
    Compatibility {
        /// Suite name.
        suite: String,
        /// Declared requirement as written in the suite configuration.
        required: String,
        /// Version of the running framework.
        running: String,
    },

    /// A target expression resolved to nothing on disk.
    #[error("target not found: '{expression}'{origin}")]
    TargetNotFound {
        /// Offending expression.
        expression: String,
        /// Where the expression was supplied.
        origin: TargetOrigin,
    },

    /// A target expression is structurally illegal.
    #[error("invalid target '{expression}'{origin}: {reason}")]
    InvalidTarget {
        /// Offending expression.
        expression: String,
        /// Where the expression was supplied.
        origin: TargetOrigin,
        /// Why the expression was rejected.
        reason: String,
    },

    /// Filesystem access failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Several errors of one resolution step, reported together.
    #[error("multiple errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
