//! Locating, validating and scaffolding test suites.
//!
//! A suite is a directory named `<name>_suite` holding a features folder
//! with one sub-directory per feature area, and a support folder with
//! shared modules. The optional `suite.conf` renames those folders and
//! declares the framework version the suite was written against.

mod compat;
mod conf;
mod layout;
pub(crate) mod listing;
mod locator;
mod scaffold;
mod violation;

pub use compat::CompatibilityChecker;
pub use conf::SuiteConf;
pub use layout::{FeatureArea, Suite};
pub use locator::{SuiteLocator, suite_dir_name};
pub use scaffold::create_suite;
pub use violation::{StructureViolation, Violations};

/// Suffix carried by every suite directory.
pub const SUITE_SUFFIX: &str = "_suite";
/// Name of the per-suite configuration file.
pub const SUITE_CONFIG_FILE: &str = "suite.conf";
/// Name of the per-suite dependency list.
pub const SUITE_REQUIREMENTS_FILE: &str = "requirements.txt";
/// Default name of the folder holding feature areas.
pub const DEFAULT_FEATURES_FOLDER: &str = "features";
/// Default name of the folder holding shared support modules.
pub const DEFAULT_SUPPORT_FOLDER: &str = "support";
/// File extension of feature files.
pub const FEATURE_EXTENSION: &str = "feature";
/// File extension of step and support modules.
pub const MODULE_EXTENSION: &str = "py";
