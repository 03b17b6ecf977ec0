//! Creates new, empty suites.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use super::{
    DEFAULT_FEATURES_FOLDER, DEFAULT_SUPPORT_FOLDER, SUITE_CONFIG_FILE, SUITE_REQUIREMENTS_FILE,
    suite_dir_name,
};
use crate::config::keys::SUITE;
use crate::{IoResultExt, SystestError, SystestResult};

const CONFIG_TEMPLATE: &str = "\
# Framework version the suite is guaranteed to support.
# Checked before any target is resolved.
# framework_version=0.1.0

# Directory holding one sub-directory per feature area.
# features_folder=features

# Directory holding shared support modules.
# support_folder=support
";

const REQUIREMENTS_TEMPLATE: &str = "\
# Dependencies the suite's step and support modules need.
#
# Examples:
#
# requests==2.0.1
# requests>=2.0.1
# requests~=2.0.1
";

/// Create the skeleton of a suite called `name` below `suites_dir`.
///
/// The skeleton has empty features and support folders plus commented
/// configuration and requirements templates. Feature areas still have to
/// be added before the suite passes validation.
///
/// # Errors
///
/// Returns [`SystestError::Config`] for an invalid name or when the suite
/// directory already exists, and an I/O error when creation fails.
pub fn create_suite(name: &str, suites_dir: &Utf8Path) -> SystestResult<Utf8PathBuf> {
    let root = suites_dir.join(suite_dir_name(name)?);
    if root.exists() {
        return Err(SystestError::config(
            SUITE,
            format!("test suite already exists: '{root}'"),
        ));
    }
    let features = root.join(DEFAULT_FEATURES_FOLDER);
    let support = root.join(DEFAULT_SUPPORT_FOLDER);
    std::fs::create_dir_all(&features).with_path(&features)?;
    std::fs::create_dir(&support).with_path(&support)?;
    write(&root.join(SUITE_CONFIG_FILE), CONFIG_TEMPLATE)?;
    write(&root.join(SUITE_REQUIREMENTS_FILE), REQUIREMENTS_TEMPLATE)?;
    write(&support.join("__init__.py"), "")?;
    info!(%root, "created test suite");
    Ok(root)
}

fn write(path: &Utf8Path, contents: &str) -> SystestResult<()> {
    std::fs::write(path, contents).with_path(path)
}
