//! Resolves target expressions against a validated suite.

use std::collections::HashSet;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use super::at_file::AtFile;
use super::expr::{TargetExpr, classify};
use super::glob::{GlobMatch, expand};
use super::{ExecutionTarget, TargetOrigin};
use crate::paths::{anchored, current_dir};
use crate::suite::listing::list_tree;
use crate::suite::{FEATURE_EXTENSION, Suite};
use crate::{IoResultExt, SystestError, SystestResult};

/// Expands target expressions into [`ExecutionTarget`]s for one suite.
///
/// Relative paths are taken from the suite's features folder, relative
/// indirection files from the working directory. Every resolved path must
/// lie inside the features folder.
///
/// # Examples
///
/// ```rust,no_run
/// use systest::suite::SuiteLocator;
/// use systest::target::TargetResolver;
///
/// # fn run() -> systest::SystestResult<()> {
/// let suite = SuiteLocator::new("suites").locate("mock")?;
/// let targets = TargetResolver::new(&suite)?.resolve(&["login/sign_in.feature:12"])?;
/// assert_eq!(targets.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TargetResolver<'s> {
    suite: &'s Suite,
    cwd: Utf8PathBuf,
}

#[derive(Debug, Default)]
struct Collected {
    targets: Vec<ExecutionTarget>,
    seen: HashSet<(Utf8PathBuf, Option<u32>)>,
    errors: Vec<Arc<SystestError>>,
}

impl Collected {
    fn push(&mut self, target: ExecutionTarget) {
        if self
            .seen
            .insert((target.path().to_path_buf(), target.line()))
        {
            self.targets.push(target);
        } else {
            debug!(%target, "dropping duplicate target");
        }
    }
}

impl<'s> TargetResolver<'s> {
    /// Create a resolver reading indirection files relative to the process
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the working directory cannot be determined.
    pub fn new(suite: &'s Suite) -> SystestResult<Self> {
        Ok(Self::with_cwd(suite, current_dir()?))
    }

    /// Create a resolver reading indirection files relative to `cwd`.
    #[must_use]
    pub fn with_cwd(suite: &'s Suite, cwd: impl Into<Utf8PathBuf>) -> Self {
        Self {
            suite,
            cwd: cwd.into(),
        }
    }

    /// Resolve `expressions` in order.
    ///
    /// With no expressions, every feature area of the suite is targeted in
    /// listing order. Targets are deduplicated by path and line, keeping the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`SystestError::TargetNotFound`] or
    /// [`SystestError::InvalidTarget`], aggregated when several expressions
    /// fail.
    pub fn resolve<S: AsRef<str>>(&self, expressions: &[S]) -> SystestResult<Vec<ExecutionTarget>> {
        let given: Vec<&str> = expressions
            .iter()
            .map(|raw| raw.as_ref())
            .filter(|raw| !raw.trim().is_empty())
            .collect();
        if given.is_empty() {
            let targets: Vec<ExecutionTarget> = self
                .suite
                .areas()
                .iter()
                .map(|area| ExecutionTarget::feature_area(area.path().to_path_buf()))
                .collect();
            info!(count = targets.len(), "targeting every feature area");
            return Ok(targets);
        }

        let mut collected = Collected::default();
        for raw in given {
            self.resolve_top_level(raw, &mut collected);
        }
        let Collected {
            targets, errors, ..
        } = collected;
        SystestError::check_collected(errors)?;
        info!(count = targets.len(), "resolved targets");
        Ok(targets)
    }

    fn resolve_top_level(&self, raw: &str, collected: &mut Collected) {
        let origin = TargetOrigin::CommandLine;
        match classify(raw, &origin) {
            Ok(TargetExpr::Indirect(file)) => self.resolve_at_file(raw, file, collected),
            Ok(TargetExpr::Path { path, line, glob }) => {
                self.resolve_path(raw, path, line, glob, &origin, collected);
            }
            Err(err) => collected.errors.push(err),
        }
    }

    fn resolve_at_file(&self, raw: &str, file: &str, collected: &mut Collected) {
        let path = anchored(&self.cwd, Utf8Path::new(file));
        let at_file = match AtFile::read(&path, raw, &TargetOrigin::CommandLine) {
            Ok(parsed) => parsed,
            Err(err) => {
                collected.errors.push(err);
                return;
            }
        };
        debug!(path = %at_file.path(), entries = at_file.entries().len(), "reading indirection file");
        for entry in at_file.entries() {
            let origin = at_file.origin_of(entry);
            match classify(&entry.expression, &origin) {
                Ok(TargetExpr::Indirect(_)) => collected.errors.push(SystestError::invalid_target(
                    &entry.expression,
                    &origin,
                    "indirection files cannot reference other indirection files",
                )),
                Ok(TargetExpr::Path { path, line, glob }) => {
                    self.resolve_path(&entry.expression, path, line, glob, &origin, collected);
                }
                Err(err) => collected.errors.push(err),
            }
        }
    }

    fn resolve_path(
        &self,
        raw: &str,
        path: &str,
        line: Option<u32>,
        glob: bool,
        origin: &TargetOrigin,
        collected: &mut Collected,
    ) {
        let outcome = if glob {
            self.expand_glob(raw, path, line, origin)
        } else {
            self.resolve_literal(raw, path, line, origin).map(|target| vec![target])
        };
        match outcome {
            Ok(targets) => targets.into_iter().for_each(|target| collected.push(target)),
            Err(err) => collected.errors.push(err),
        }
    }

    fn resolve_literal(
        &self,
        raw: &str,
        path: &str,
        line: Option<u32>,
        origin: &TargetOrigin,
    ) -> SystestResult<ExecutionTarget> {
        let candidate = anchored(self.suite.features_dir(), Utf8Path::new(path));
        if !candidate.exists() {
            return Err(SystestError::target_not_found(raw, origin));
        }
        let resolved = candidate.canonicalize_utf8().with_path(&candidate)?;
        let is_dir = resolved.is_dir();
        self.classify_match(raw, resolved, is_dir, line, origin)?
            .ok_or_else(|| {
                SystestError::invalid_target(raw, origin, "not a feature file or feature area")
            })
    }

    fn expand_glob(
        &self,
        raw: &str,
        pattern: &str,
        line: Option<u32>,
        origin: &TargetOrigin,
    ) -> SystestResult<Vec<ExecutionTarget>> {
        let anchored_pattern = anchored(self.suite.features_dir(), Utf8Path::new(pattern));
        let mut targets = Vec::new();
        for GlobMatch { path, is_dir } in expand(&anchored_pattern, raw, origin)? {
            if line.is_some() && is_dir {
                continue;
            }
            let resolved = path.canonicalize_utf8().with_path(&path)?;
            if let Some(target) = self.classify_match(raw, resolved, is_dir, line, origin)? {
                targets.push(target);
            }
        }
        if targets.is_empty() {
            return Err(SystestError::target_not_found(raw, origin));
        }
        debug!(pattern = raw, matched = targets.len(), "expanded glob");
        Ok(targets)
    }

    /// Turn an existing canonical path into a target.
    ///
    /// Directories count as feature areas when any feature file lies beneath
    /// them. `None` means the path is neither.
    fn classify_match(
        &self,
        raw: &str,
        resolved: Utf8PathBuf,
        is_dir: bool,
        line: Option<u32>,
        origin: &TargetOrigin,
    ) -> SystestResult<Option<ExecutionTarget>> {
        let features_dir = self.suite.features_dir();
        if !resolved.starts_with(features_dir) {
            return Err(SystestError::invalid_target(
                raw,
                origin,
                format!(
                    "'{resolved}' is outside the features folder of suite '{}'",
                    self.suite.name()
                ),
            ));
        }
        if is_dir {
            if line.is_some() {
                return Err(SystestError::invalid_target(
                    raw,
                    origin,
                    "a line number requires a feature file",
                ));
            }
            if resolved == features_dir {
                return Ok(Some(ExecutionTarget::suite(resolved)));
            }
            let has_features = list_tree(&resolved)?
                .iter()
                .any(|entry| entry.has_extension(FEATURE_EXTENSION));
            return Ok(has_features.then(|| ExecutionTarget::feature_area(resolved)));
        }
        if resolved.extension() != Some(FEATURE_EXTENSION) {
            return Ok(None);
        }
        Ok(Some(match line {
            Some(number) => ExecutionTarget::scenario(resolved, number),
            None => ExecutionTarget::feature_file(resolved),
        }))
    }
}
