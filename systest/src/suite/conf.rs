//! The optional `suite.conf` file.

use camino::Utf8Path;
use serde::Serialize;
use tracing::warn;

use super::{DEFAULT_FEATURES_FOLDER, DEFAULT_SUPPORT_FOLDER, SUITE_CONFIG_FILE};
use crate::config::{parse_properties, unquote};
use crate::{IoResultExt, SystestResult};

/// Settings declared by a suite about itself.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SuiteConf {
    /// Framework version requirement, if declared.
    pub framework_version: Option<String>,
    /// Folder holding the feature areas.
    pub features_folder: String,
    /// Folder holding shared support modules.
    pub support_folder: String,
}

impl Default for SuiteConf {
    fn default() -> Self {
        Self {
            framework_version: None,
            features_folder: DEFAULT_FEATURES_FOLDER.to_owned(),
            support_folder: DEFAULT_SUPPORT_FOLDER.to_owned(),
        }
    }
}

impl SuiteConf {
    /// Read `suite.conf` from `suite_dir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(suite_dir: &Utf8Path) -> SystestResult<Self> {
        let path = suite_dir.join(SUITE_CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).with_path(&path)?;
        Self::parse(&path, &contents)
    }

    /// Parse `contents` read from `path`.
    ///
    /// Empty values leave the default in place. Unknown keys are logged and
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed lines.
    pub fn parse(path: &Utf8Path, contents: &str) -> SystestResult<Self> {
        let mut conf = Self::default();
        for entry in parse_properties(path, contents)? {
            let value = unquote(entry.value.trim()).trim();
            if value.is_empty() {
                continue;
            }
            match entry.key.trim() {
                "framework_version" => conf.framework_version = Some(value.to_owned()),
                "features_folder" => value.clone_into(&mut conf.features_folder),
                "support_folder" => value.clone_into(&mut conf.support_folder),
                other => warn!(%path, line = entry.line, key = other, "ignoring unknown suite setting"),
            }
        }
        Ok(conf)
    }
}
