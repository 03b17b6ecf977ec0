//! Scenario state shared between steps.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use systest::SystestResult;
use systest::config::{CliValues, ResolvedConfiguration};
use systest::suite::Suite;
use systest::target::ExecutionTarget;
use test_helpers::suite::SuiteTree;

/// Inputs and outcome of a configuration resolution.
#[derive(Debug, Default, ScenarioState)]
pub struct ConfigContext {
    pub env: Slot<Vec<(String, String)>>,
    pub user_file: Slot<String>,
    pub project_file: Slot<String>,
    pub explicit_file: Slot<String>,
    pub cli: Slot<CliValues>,
    pub result: Slot<SystestResult<ResolvedConfiguration>>,
}

/// A suites directory plus the outcome of locating or resolving in it.
#[derive(Debug, Default, ScenarioState)]
pub struct SuiteContext {
    pub tree: Slot<SuiteTree>,
    pub located: Slot<SystestResult<Suite>>,
    pub targets: Slot<SystestResult<Vec<ExecutionTarget>>>,
}

/// Fresh configuration state for each scenario.
#[fixture]
pub fn config_context() -> ConfigContext {
    ConfigContext::default()
}

/// Fresh suite state for each scenario.
#[fixture]
pub fn suite_context() -> SuiteContext {
    SuiteContext::default()
}
