//! Error types produced while resolving configuration, suites and targets.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::SystestError;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so that collected
/// failures can be aggregated without cloning.
pub type SystestResult<T> = Result<T, std::sync::Arc<SystestError>>;
