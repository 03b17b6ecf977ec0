//! Finds a suite by name and validates its structure.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::layout::SuiteParts;
use super::listing::{Listed, list_dir, list_tree};
use super::{
    FEATURE_EXTENSION, FeatureArea, MODULE_EXTENSION, SUITE_SUFFIX, StructureViolation, Suite,
    SuiteConf, Violations,
};
use crate::config::ResolvedConfiguration;
use crate::config::keys::{ENVIRONMENT_FILE, KEYS, STEPS_DIR, SUITE, lookup};
use crate::paths::{anchored, current_dir};
use crate::{IoResultExt, SystestError, SystestResult};

/// Directory name for the suite called `name`.
///
/// The name may already carry the `_suite` suffix. Empty names, `.`/`..`
/// and names containing path separators are rejected.
///
/// # Errors
///
/// Returns [`SystestError::Config`] for an invalid name.
///
/// # Examples
///
/// ```
/// use systest::suite::suite_dir_name;
///
/// assert_eq!(suite_dir_name("mock").unwrap(), "mock_suite");
/// assert_eq!(suite_dir_name("mock_suite").unwrap(), "mock_suite");
/// assert!(suite_dir_name("../mock").is_err());
/// ```
pub fn suite_dir_name(name: &str) -> SystestResult<String> {
    let trimmed = name.trim();
    let base = trimmed.strip_suffix(SUITE_SUFFIX).unwrap_or(trimmed);
    let invalid = base.is_empty()
        || base == "."
        || base == ".."
        || base.contains(['/', '\\'])
        || Utf8Path::new(base).components().count() != 1;
    if invalid {
        return Err(SystestError::config(
            SUITE,
            format!("invalid suite name '{name}'"),
        ));
    }
    Ok(format!("{base}{SUITE_SUFFIX}"))
}

/// Locates suites below a suites directory.
#[derive(Clone, Debug)]
pub struct SuiteLocator {
    suites_dir: Utf8PathBuf,
    steps_dir: String,
    environment_file: String,
}

impl SuiteLocator {
    /// Create a locator for suites below `suites_dir` using the default
    /// steps directory and hooks file names.
    #[must_use]
    pub fn new(suites_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            suites_dir: suites_dir.into(),
            steps_dir: key_default(STEPS_DIR),
            environment_file: key_default(ENVIRONMENT_FILE),
        }
    }

    /// Create a locator from resolved configuration.
    ///
    /// A relative `suites_directory` is taken from the working directory,
    /// as is an unset one.
    ///
    /// # Errors
    ///
    /// Returns an error when the working directory cannot be determined.
    pub fn from_config(config: &ResolvedConfiguration) -> SystestResult<Self> {
        Ok(Self::from_config_in(config, &current_dir()?))
    }

    /// Like [`Self::from_config`], taking relative paths from `cwd`.
    #[must_use]
    pub fn from_config_in(config: &ResolvedConfiguration, cwd: &Utf8Path) -> Self {
        let suites_dir = config
            .suites_directory()
            .map_or_else(|| cwd.to_path_buf(), |dir| anchored(cwd, &dir));
        let mut locator = Self::new(suites_dir);
        if let Some(steps) = config.scalar(STEPS_DIR).filter(|v| !v.is_empty()) {
            steps.clone_into(&mut locator.steps_dir);
        }
        if let Some(hooks) = config.scalar(ENVIRONMENT_FILE).filter(|v| !v.is_empty()) {
            hooks.clone_into(&mut locator.environment_file);
        }
        locator
    }

    /// Override the steps directory name.
    #[must_use]
    pub fn steps_dir(mut self, name: impl Into<String>) -> Self {
        self.steps_dir = name.into();
        self
    }

    /// Override the hooks file name.
    #[must_use]
    pub fn environment_file(mut self, name: impl Into<String>) -> Self {
        self.environment_file = name.into();
        self
    }

    /// Directory searched for suites.
    #[must_use]
    pub fn suites_dir(&self) -> &Utf8Path {
        &self.suites_dir
    }

    /// Basename reserved for the hooks module, e.g. `environment`.
    #[must_use]
    pub fn reserved_basename(&self) -> &str {
        Utf8Path::new(&self.environment_file)
            .file_stem()
            .unwrap_or(self.environment_file.as_str())
    }

    /// Names of every suite directory below the suites directory, without
    /// the suffix.
    ///
    /// # Errors
    ///
    /// Returns an error when the suites directory cannot be listed.
    pub fn list_suites(&self) -> SystestResult<Vec<String>> {
        Ok(list_dir(&self.suites_dir)?
            .into_iter()
            .filter(|entry| entry.is_dir)
            .filter_map(|entry| {
                entry
                    .path
                    .file_name()
                    .and_then(|dir| dir.strip_suffix(SUITE_SUFFIX))
                    .filter(|base| !base.is_empty())
                    .map(ToOwned::to_owned)
            })
            .collect())
    }

    /// Locate the suite called `name` and validate its structure.
    ///
    /// Validation does not stop at the first problem: every violation is
    /// collected into a single [`SystestError::Structure`].
    ///
    /// # Errors
    ///
    /// Returns [`SystestError::Config`] for an invalid name,
    /// [`SystestError::Structure`] when the suite is missing or malformed,
    /// and I/O or parse errors raised while reading it.
    pub fn locate(&self, name: &str) -> SystestResult<Suite> {
        let dir_name = suite_dir_name(name)?;
        let base = dir_name
            .strip_suffix(SUITE_SUFFIX)
            .unwrap_or(&dir_name)
            .to_owned();
        let candidate = self.suites_dir.join(&dir_name);
        if !candidate.is_dir() {
            return Err(structure_error(
                &base,
                StructureViolation::MissingSuiteDirectory(candidate).into(),
            ));
        }
        let root = candidate.canonicalize_utf8().with_path(&candidate)?;
        let conf = SuiteConf::load(&root)?;
        let features_dir = root.join(&conf.features_folder);
        let support_dir = root.join(&conf.support_folder);
        debug!(suite = %base, %root, "validating suite");

        let mut violations = Violations::new();
        if support_dir.is_dir() {
            let modules = list_tree(&support_dir)?;
            self.check_reserved(&modules, MODULE_EXTENSION, &mut violations);
        } else {
            violations.push(StructureViolation::MissingSupportFolder(support_dir.clone()));
        }

        let mut areas = Vec::new();
        if features_dir.is_dir() {
            let area_dirs: Vec<Listed> = list_dir(&features_dir)?
                .into_iter()
                .filter(|entry| entry.is_dir)
                .collect();
            if area_dirs.is_empty() {
                violations.push(StructureViolation::NoFeatureAreas(features_dir.clone()));
            }
            for area_dir in area_dirs {
                areas.push(self.inspect_area(area_dir.path, &mut violations)?);
            }
        } else {
            violations.push(StructureViolation::MissingFeaturesFolder(
                features_dir.clone(),
            ));
        }

        if !violations.is_empty() {
            return Err(structure_error(&base, violations));
        }
        Ok(Suite::new(
            SuiteParts {
                name: base,
                root,
                features_dir,
                support_dir,
                framework_version: conf.framework_version,
            },
            areas,
        ))
    }

    fn inspect_area(
        &self,
        path: Utf8PathBuf,
        violations: &mut Violations,
    ) -> SystestResult<FeatureArea> {
        let steps_dir = path.join(&self.steps_dir);
        let features: Vec<Listed> = list_tree(&path)?
            .into_iter()
            .filter(|entry| {
                entry.has_extension(FEATURE_EXTENSION) && !entry.path.starts_with(&steps_dir)
            })
            .collect();
        if features.is_empty() {
            violations.push(StructureViolation::NoFeatureFiles(path.clone()));
        }
        self.check_reserved(&features, FEATURE_EXTENSION, violations);

        let modules: Vec<Listed> = if steps_dir.is_dir() {
            list_dir(&steps_dir)?
                .into_iter()
                .filter(|entry| entry.has_extension(MODULE_EXTENSION))
                .collect()
        } else {
            violations.push(StructureViolation::MissingStepsDirectory {
                area: path.clone(),
                steps_dir: steps_dir.clone(),
            });
            Vec::new()
        };
        if steps_dir.is_dir() && modules.is_empty() {
            violations.push(StructureViolation::NoStepModules(steps_dir.clone()));
        }
        self.check_reserved(&modules, MODULE_EXTENSION, violations);

        let name = path.file_name().unwrap_or_default().to_owned();
        Ok(FeatureArea::new(
            name,
            path,
            features.into_iter().map(|entry| entry.path).collect(),
            steps_dir,
            modules.into_iter().map(|entry| entry.path).collect(),
        ))
    }

    fn check_reserved(&self, entries: &[Listed], extension: &str, violations: &mut Violations) {
        let reserved = self.reserved_basename();
        for entry in entries
            .iter()
            .filter(|entry| entry.has_extension(extension) && entry.stem() == Some(reserved))
        {
            violations.push(StructureViolation::ReservedBasename {
                path: entry.path.clone(),
                basename: reserved.to_owned(),
            });
        }
    }
}

fn key_default(name: &str) -> String {
    lookup(KEYS, name)
        .and_then(|key| key.default_value().as_scalar().map(ToOwned::to_owned))
        .unwrap_or_default()
}

fn structure_error(suite: &str, violations: Violations) -> std::sync::Arc<SystestError> {
    std::sync::Arc::new(SystestError::Structure {
        suite: suite.to_owned(),
        violations,
    })
}
