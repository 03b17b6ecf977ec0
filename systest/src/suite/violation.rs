//! Structural problems found while validating a suite.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// A single structural rule a suite breaks.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum StructureViolation {
    /// The suite directory itself does not exist.
    #[error("suite directory '{0}' does not exist")]
    MissingSuiteDirectory(Utf8PathBuf),
    /// The features folder is absent.
    #[error("features folder '{0}' is missing")]
    MissingFeaturesFolder(Utf8PathBuf),
    /// The support folder is absent.
    #[error("support folder '{0}' is missing")]
    MissingSupportFolder(Utf8PathBuf),
    /// The features folder contains no feature areas.
    #[error("features folder '{0}' contains no feature area")]
    NoFeatureAreas(Utf8PathBuf),
    /// A feature area has no feature files.
    #[error("feature area '{0}' contains no .feature file")]
    NoFeatureFiles(Utf8PathBuf),
    /// A feature area has no steps directory.
    #[error("feature area '{area}' has no steps directory '{steps_dir}'")]
    MissingStepsDirectory {
        /// Feature area directory.
        area: Utf8PathBuf,
        /// Expected steps directory.
        steps_dir: Utf8PathBuf,
    },
    /// The steps directory holds no step module.
    #[error("steps directory '{0}' contains no step module")]
    NoStepModules(Utf8PathBuf),
    /// A file uses the basename reserved for hooks.
    #[error("'{path}' uses the reserved basename '{basename}'")]
    ReservedBasename {
        /// Offending file.
        path: Utf8PathBuf,
        /// The reserved basename.
        basename: String,
    },
}

/// Every violation found in one suite, in discovery order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Violations(Vec<StructureViolation>);

impl Violations {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a violation.
    pub fn push(&mut self, violation: StructureViolation) {
        self.0.push(violation);
    }

    /// Iterate over the recorded violations.
    pub fn iter(&self) -> std::slice::Iter<'_, StructureViolation> {
        self.0.iter()
    }

    /// Number of violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the suite is structurally valid.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<StructureViolation> for Violations {
    fn from(violation: StructureViolation) -> Self {
        Self(vec![violation])
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a StructureViolation;
    type IntoIter = std::slice::Iter<'a, StructureViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {violation}")?;
        }
        Ok(())
    }
}
