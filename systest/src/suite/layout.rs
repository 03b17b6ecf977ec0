//! Validated suite layout.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

/// A feature area: one directory of feature files with its step modules.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FeatureArea {
    name: String,
    path: Utf8PathBuf,
    feature_files: Vec<Utf8PathBuf>,
    steps_dir: Utf8PathBuf,
    step_modules: Vec<Utf8PathBuf>,
}

impl FeatureArea {
    pub(crate) const fn new(
        name: String,
        path: Utf8PathBuf,
        feature_files: Vec<Utf8PathBuf>,
        steps_dir: Utf8PathBuf,
        step_modules: Vec<Utf8PathBuf>,
    ) -> Self {
        Self {
            name,
            path,
            feature_files,
            steps_dir,
            step_modules,
        }
    }

    /// Directory name of the area.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the area directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Feature files beneath the area outside its steps directory, sorted.
    #[must_use]
    pub fn feature_files(&self) -> &[Utf8PathBuf] {
        &self.feature_files
    }

    /// Directory holding the area's step modules.
    #[must_use]
    pub fn steps_dir(&self) -> &Utf8Path {
        &self.steps_dir
    }

    /// Step modules, sorted.
    #[must_use]
    pub fn step_modules(&self) -> &[Utf8PathBuf] {
        &self.step_modules
    }
}

/// A located and structurally valid suite.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Suite {
    name: String,
    root: Utf8PathBuf,
    features_dir: Utf8PathBuf,
    support_dir: Utf8PathBuf,
    framework_version: Option<String>,
    areas: Vec<FeatureArea>,
}

/// Paths and declarations that make up a [`Suite`].
#[derive(Clone, Debug)]
pub(crate) struct SuiteParts {
    pub(crate) name: String,
    pub(crate) root: Utf8PathBuf,
    pub(crate) features_dir: Utf8PathBuf,
    pub(crate) support_dir: Utf8PathBuf,
    pub(crate) framework_version: Option<String>,
}

impl Suite {
    pub(crate) fn new(parts: SuiteParts, areas: Vec<FeatureArea>) -> Self {
        Self {
            name: parts.name,
            root: parts.root,
            features_dir: parts.features_dir,
            support_dir: parts.support_dir,
            framework_version: parts.framework_version,
            areas,
        }
    }

    /// Suite name without the `_suite` suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the suite directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of the features folder.
    #[must_use]
    pub fn features_dir(&self) -> &Utf8Path {
        &self.features_dir
    }

    /// Absolute path of the support folder.
    #[must_use]
    pub fn support_dir(&self) -> &Utf8Path {
        &self.support_dir
    }

    /// Declared framework version requirement.
    #[must_use]
    pub fn framework_version(&self) -> Option<&str> {
        self.framework_version.as_deref()
    }

    /// Feature areas in directory-listing order.
    #[must_use]
    pub fn areas(&self) -> &[FeatureArea] {
        &self.areas
    }

    /// Look up a feature area by directory name.
    #[must_use]
    pub fn area(&self, name: &str) -> Option<&FeatureArea> {
        self.areas.iter().find(|area| area.name == name)
    }
}
