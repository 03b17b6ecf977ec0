//! Configuration and test-target resolution for behavioural test suites.
//!
//! The crate prepares a run for an external BDD execution engine. It
//! resolves configuration across five tiers (environment, user file,
//! project file, explicit file and command line), locates and validates the
//! requested suite, checks the suite's framework version, and expands the
//! requested targets into an ordered list of feature areas, feature files
//! and scenarios.
//!
//! ```rust,no_run
//! use systest::config::CliValues;
//! use systest::{ResolutionRequest, resolve};
//!
//! # fn main() -> systest::SystestResult<()> {
//! let cli = CliValues::new()
//!     .with("suite", "mock")
//!     .with_list("paths", ["login/sign_in.feature:12"]);
//! let plan = resolve(&ResolutionRequest::new(cli))?;
//! for target in &plan.targets {
//!     println!("{target}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
mod error;
mod paths;
mod pipeline;
mod result_ext;
pub mod suite;
pub mod target;

pub use error::{AggregatedErrors, SystestError, SystestResult};
pub use pipeline::{ResolutionPlan, ResolutionRequest, resolve};
pub use result_ext::IoResultExt;
pub use suite::create_suite;

/// Version of the running framework, compared against suite declarations.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
