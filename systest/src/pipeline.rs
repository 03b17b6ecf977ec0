//! End-to-end resolution: configuration, suite, compatibility, targets.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{info, info_span};

use crate::config::keys::{CONFIG, PATHS, SUITE};
use crate::config::{CliValue, CliValues, ConfigLoader, ResolvedConfiguration, merge_sources};
use crate::paths::{anchored, current_dir};
use crate::suite::{CompatibilityChecker, Suite, SuiteLocator};
use crate::target::{ExecutionTarget, TargetResolver};
use crate::{SystestError, SystestResult};

/// Inputs of one resolution run.
///
/// Each collaborator can be replaced, which keeps runs independent of the
/// real environment, home directory and working directory.
#[derive(Clone, Debug)]
pub struct ResolutionRequest {
    cli: CliValues,
    loader: ConfigLoader,
    checker: CompatibilityChecker,
    cwd: Option<Utf8PathBuf>,
}

impl ResolutionRequest {
    /// Request using the real environment and the given command-line tier.
    #[must_use]
    pub fn new(cli: CliValues) -> Self {
        Self {
            cli,
            loader: ConfigLoader::new(),
            checker: CompatibilityChecker::default(),
            cwd: None,
        }
    }

    /// Replace the loader for tiers one to four.
    #[must_use]
    pub fn loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Replace the compatibility checker.
    #[must_use]
    pub fn checker(mut self, checker: CompatibilityChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Directory that relative suites directories and indirection files
    /// are taken from. Defaults to the process working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Everything the execution engine needs to run.
#[derive(Clone, Debug, Serialize)]
pub struct ResolutionPlan {
    /// Effective configuration with provenance.
    pub configuration: ResolvedConfiguration,
    /// The validated, compatible suite.
    pub suite: Suite,
    /// Ordered, deduplicated targets.
    pub targets: Vec<ExecutionTarget>,
}

/// Run the whole resolution for `request`.
///
/// The steps run in a fixed order and the first failing step aborts the
/// run; no partial plan is returned.
///
/// # Errors
///
/// Returns the error of the first failing step, or
/// [`SystestError::Config`] when no suite was named.
pub fn resolve(request: &ResolutionRequest) -> SystestResult<ResolutionPlan> {
    let _span = info_span!("resolve").entered();
    let cwd = match &request.cwd {
        Some(dir) => dir.clone(),
        None => current_dir()?,
    };

    let loader = match request.cli.get(CONFIG) {
        Some(CliValue::Scalar(file)) if !file.trim().is_empty() => request
            .loader
            .clone()
            .explicit_file(anchored(&cwd, Utf8Path::new(file.trim()))),
        _ => request.loader.clone(),
    };
    let sources = loader.load()?;
    let configuration = merge_sources(&sources, &request.cli)?;

    let name = configuration
        .suite()
        .ok_or_else(|| SystestError::config(SUITE, "no test suite given"))?
        .to_owned();
    let suite = SuiteLocator::from_config_in(&configuration, &cwd).locate(&name)?;
    request.checker.check(&suite)?;

    let targets = TargetResolver::with_cwd(&suite, cwd).resolve(configuration.list(PATHS))?;
    info!(suite = suite.name(), targets = targets.len(), "resolution complete");
    Ok(ResolutionPlan {
        configuration,
        suite,
        targets,
    })
}
