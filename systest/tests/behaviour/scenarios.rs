//! Binds the feature files to the shared fixtures.

use crate::fixtures::{ConfigContext, SuiteContext, config_context, suite_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/config_merge.feature",
    fixtures = [config_context: ConfigContext]
);
scenarios!(
    "tests/features/suite_validation.feature",
    fixtures = [suite_context: SuiteContext]
);
scenarios!(
    "tests/features/target_resolution.feature",
    fixtures = [suite_context: SuiteContext]
);
