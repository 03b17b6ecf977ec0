//! Turning target expressions into an ordered list of execution targets.
//!
//! A target expression names a whole suite, a feature area, a feature file
//! or a single scenario (`file.feature:LINE`). Expressions may contain glob
//! patterns and may be collected in indirection files passed as `@path`.

mod at_file;
mod expr;
mod glob;
mod resolver;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

pub use at_file::{AtEntry, AtFile};
pub use expr::{TargetExpr, classify};
pub use resolver::TargetResolver;

/// Granularity of an [`ExecutionTarget`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Every feature area of the suite.
    Suite,
    /// Every feature file of one area.
    FeatureArea,
    /// One feature file.
    FeatureFile,
    /// The scenario at a line of one feature file.
    Scenario,
}

/// A resolved unit of work handed to the execution engine.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct ExecutionTarget {
    kind: TargetKind,
    path: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl ExecutionTarget {
    /// Target covering the whole suite rooted at `features_dir`.
    #[must_use]
    pub const fn suite(features_dir: Utf8PathBuf) -> Self {
        Self {
            kind: TargetKind::Suite,
            path: features_dir,
            line: None,
        }
    }

    /// Target covering one feature area directory.
    #[must_use]
    pub const fn feature_area(path: Utf8PathBuf) -> Self {
        Self {
            kind: TargetKind::FeatureArea,
            path,
            line: None,
        }
    }

    /// Target covering one feature file.
    #[must_use]
    pub const fn feature_file(path: Utf8PathBuf) -> Self {
        Self {
            kind: TargetKind::FeatureFile,
            path,
            line: None,
        }
    }

    /// Target covering the scenario at `line` of a feature file.
    #[must_use]
    pub const fn scenario(path: Utf8PathBuf, line: u32) -> Self {
        Self {
            kind: TargetKind::Scenario,
            path,
            line: Some(line),
        }
    }

    /// Granularity of the target.
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Canonical path of the target.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Line number, present only for scenarios.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Where a target expression was supplied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum TargetOrigin {
    /// Given directly, on the command line or through configuration.
    #[default]
    CommandLine,
    /// Read from an indirection file.
    AtFile {
        /// The indirection file.
        path: Utf8PathBuf,
        /// One-based line within the file.
        line: usize,
    },
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => Ok(()),
            Self::AtFile { path, line } => write!(f, " (from '{path}' line {line})"),
        }
    }
}
