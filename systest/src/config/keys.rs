//! Static declaration of every recognised configuration key.
//!
//! The table is part of the contract with the command-line layer: each key
//! states its value kind, its merge policy and its default. Nothing here is
//! inferred at runtime.

use serde::Serialize;

use super::ConfigValue;

/// How values from different tiers combine for one key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The highest-priority tier that defines the key wins.
    Override,
    /// Command-line values are appended to the list resolved from lower tiers.
    Additive,
}

/// Shape of the value a key holds.
///
/// The merge policy only exists for multi-valued keys, so an additive scalar
/// cannot be declared.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    /// A single string.
    Scalar,
    /// An ordered list of strings, combined according to the policy.
    Multi(MergePolicy),
}

/// Declaration of a configuration key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConfigKey {
    name: &'static str,
    kind: ValueKind,
    scalar_default: &'static str,
    list_default: &'static [&'static str],
    cli_only: bool,
}

impl ConfigKey {
    /// Declare a scalar key with `default`.
    #[must_use]
    pub const fn scalar(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Scalar,
            scalar_default: default,
            list_default: &[],
            cli_only: false,
        }
    }

    /// Declare a multi-valued key merged with `policy`, defaulting to an
    /// empty list.
    #[must_use]
    pub const fn multi(name: &'static str, policy: MergePolicy) -> Self {
        Self {
            name,
            kind: ValueKind::Multi(policy),
            scalar_default: "",
            list_default: &[],
            cli_only: false,
        }
    }

    /// Replace the default of a multi-valued key.
    #[must_use]
    pub const fn with_list_default(mut self, default: &'static [&'static str]) -> Self {
        self.list_default = default;
        self
    }

    /// Mark the key as settable from the command line only.
    #[must_use]
    pub const fn cli_only(mut self) -> Self {
        self.cli_only = true;
        self
    }

    /// Key name as used after prefix stripping.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared value kind.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.kind
    }

    /// Merge policy; always [`MergePolicy::Override`] for scalars.
    #[must_use]
    pub const fn merge_policy(&self) -> MergePolicy {
        match self.kind {
            ValueKind::Scalar => MergePolicy::Override,
            ValueKind::Multi(policy) => policy,
        }
    }

    /// Returns `true` when the key holds a list.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self.kind, ValueKind::Multi(_))
    }

    /// Returns `true` when environment and file tiers may not set the key.
    #[must_use]
    pub const fn is_cli_only(&self) -> bool {
        self.cli_only
    }

    /// Declared default as a [`ConfigValue`].
    #[must_use]
    pub fn default_value(&self) -> ConfigValue {
        match self.kind {
            ValueKind::Scalar => ConfigValue::Scalar(self.scalar_default.to_owned()),
            ValueKind::Multi(_) => ConfigValue::Multi(
                self.list_default
                    .iter()
                    .map(|value| (*value).to_owned())
                    .collect(),
            ),
        }
    }
}

/// Name of the suite to run.
pub const SUITE: &str = "suite";
/// Directory holding all suite directories.
pub const SUITES_DIRECTORY: &str = "suites_directory";
/// Explicit configuration file.
pub const CONFIG: &str = "config";
/// Test management cycle identifier forwarded to reporters.
pub const CYCLE_ID: &str = "cycle_id";
/// Name of the step-module directory inside each feature area.
pub const STEPS_DIR: &str = "steps_dir";
/// File name of the per-area hooks module.
pub const ENVIRONMENT_FILE: &str = "environment_file";
/// Regular expression of feature files to skip.
pub const EXCLUDE: &str = "exclude";
/// Gherkin language override.
pub const LANG: &str = "lang";
/// Log level forwarded to the execution engine.
pub const LOGGING_LEVEL: &str = "logging_level";
/// Stop at the first failure.
pub const STOP: &str = "stop";
/// Resolve and report without running steps.
pub const DRY_RUN: &str = "dry_run";
/// Verbose output.
pub const VERBOSE: &str = "verbose";
/// Tag expressions selecting scenarios.
pub const TAGS: &str = "tags";
/// Scenario name patterns.
pub const NAME: &str = "name";
/// Output formatters.
pub const FORMAT: &str = "format";
/// Output files, paired with formatters.
pub const OUTFILES: &str = "outfiles";
/// User data definitions, `name=value`.
pub const USERDATA_DEFINES: &str = "userdata_defines";
/// Target expressions.
pub const PATHS: &str = "paths";

/// Every recognised key.
pub static KEYS: &[ConfigKey] = &[
    ConfigKey::scalar(SUITE, "").cli_only(),
    ConfigKey::scalar(SUITES_DIRECTORY, ""),
    ConfigKey::scalar(CONFIG, "").cli_only(),
    ConfigKey::scalar(CYCLE_ID, ""),
    ConfigKey::scalar(STEPS_DIR, "steps"),
    ConfigKey::scalar(ENVIRONMENT_FILE, "environment.py"),
    ConfigKey::scalar(EXCLUDE, ""),
    ConfigKey::scalar(LANG, ""),
    ConfigKey::scalar(LOGGING_LEVEL, "ERROR"),
    ConfigKey::scalar(STOP, "false"),
    ConfigKey::scalar(DRY_RUN, "false"),
    ConfigKey::scalar(VERBOSE, "false").cli_only(),
    ConfigKey::multi(TAGS, MergePolicy::Additive),
    ConfigKey::multi(NAME, MergePolicy::Additive),
    ConfigKey::multi(FORMAT, MergePolicy::Additive),
    ConfigKey::multi(OUTFILES, MergePolicy::Additive),
    ConfigKey::multi(USERDATA_DEFINES, MergePolicy::Additive),
    ConfigKey::multi(PATHS, MergePolicy::Override),
];

/// Look up `name` in `table`.
#[must_use]
pub fn lookup<'t>(table: &'t [ConfigKey], name: &str) -> Option<&'t ConfigKey> {
    table.iter().find(|key| key.name() == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[test]
    fn key_names_are_unique() {
        let mut seen = HashSet::new();
        for key in KEYS {
            assert!(seen.insert(key.name()), "duplicate key {}", key.name());
        }
    }

    #[test]
    fn scalars_always_override() {
        for key in KEYS.iter().filter(|key| !key.is_multi()) {
            assert_eq!(key.merge_policy(), MergePolicy::Override, "{}", key.name());
        }
    }

    #[rstest]
    #[case(TAGS, MergePolicy::Additive)]
    #[case(FORMAT, MergePolicy::Additive)]
    #[case(USERDATA_DEFINES, MergePolicy::Additive)]
    #[case(PATHS, MergePolicy::Override)]
    fn multi_valued_policies(#[case] name: &str, #[case] policy: MergePolicy) {
        let key = lookup(KEYS, name).expect("declared key");
        assert_eq!(key.value_kind(), ValueKind::Multi(policy));
    }

    #[test]
    fn defaults_match_kind() {
        let steps = lookup(KEYS, STEPS_DIR).expect("declared key");
        assert_eq!(steps.default_value(), ConfigValue::Scalar("steps".into()));
        let tags = lookup(KEYS, TAGS).expect("declared key");
        assert_eq!(tags.default_value(), ConfigValue::Multi(Vec::new()));
    }

    #[test]
    fn list_default_can_be_replaced() {
        let key = ConfigKey::multi("demo", MergePolicy::Additive).with_list_default(&["a", "b"]);
        assert_eq!(
            key.default_value(),
            ConfigValue::Multi(vec!["a".into(), "b".into()])
        );
    }

    #[rstest]
    #[case(SUITE, true)]
    #[case(CONFIG, true)]
    #[case(VERBOSE, true)]
    #[case(TAGS, false)]
    #[case(SUITES_DIRECTORY, false)]
    fn cli_only_flags(#[case] name: &str, #[case] expected: bool) {
        let key = lookup(KEYS, name).expect("declared key");
        assert_eq!(key.is_cli_only(), expected);
    }
}
