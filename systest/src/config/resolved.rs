//! The frozen outcome of configuration resolution.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::Serialize;

use super::keys::{SUITE, SUITES_DIRECTORY};
use super::{ConfigValue, Tier};

/// Tiers that contributed to a resolved value, lowest priority first.
///
/// An empty provenance means the declared default was used. Additive keys
/// may list two tiers: the one that supplied the base list and
/// [`Tier::Cli`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Provenance(Vec<Tier>);

impl Provenance {
    /// Provenance of a defaulted value.
    #[must_use]
    pub const fn default_value() -> Self {
        Self(Vec::new())
    }

    /// Provenance of a value supplied by a single tier.
    #[must_use]
    pub fn single(tier: Tier) -> Self {
        Self(vec![tier])
    }

    /// Record another contributing tier.
    pub fn push(&mut self, tier: Tier) {
        self.0.push(tier);
    }

    /// Contributing tiers.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }

    /// Returns `true` when no tier set the key.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// The highest-priority contributing tier.
    #[must_use]
    pub fn winning(&self) -> Option<Tier> {
        self.0.last().copied()
    }
}

/// A resolved value together with where it came from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedEntry {
    /// The merged value.
    pub value: ConfigValue,
    /// Tiers that contributed to `value`.
    pub provenance: Provenance,
}

/// A `SYSTEST_` entry whose name is not a declared key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UnrecognisedKey {
    /// Tier the entry was read from.
    pub tier: Tier,
    /// Normalised key name.
    pub key: String,
    /// File holding the entry, for file tiers.
    pub path: Option<Utf8PathBuf>,
    /// Line of the entry, for file tiers.
    pub line: Option<usize>,
}

/// Effective configuration for one invocation.
///
/// Holds a value for every declared key. Built once by the merge engine and
/// never modified afterwards.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResolvedConfiguration {
    entries: BTreeMap<String, ResolvedEntry>,
    unrecognised: Vec<UnrecognisedKey>,
}

impl ResolvedConfiguration {
    pub(crate) const fn new(
        entries: BTreeMap<String, ResolvedEntry>,
        unrecognised: Vec<UnrecognisedKey>,
    ) -> Self {
        Self {
            entries,
            unrecognised,
        }
    }

    /// Resolved entry for `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&ResolvedEntry> {
        self.entries.get(key)
    }

    /// Resolved value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Scalar value of `key`; `None` for undeclared or multi-valued keys.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_scalar)
    }

    /// List value of `key`; empty for undeclared or scalar keys.
    #[must_use]
    pub fn list(&self, key: &str) -> &[String] {
        self.get(key).and_then(ConfigValue::as_list).unwrap_or(&[])
    }

    /// Provenance of `key`.
    #[must_use]
    pub fn provenance(&self, key: &str) -> Option<&Provenance> {
        self.entry(key).map(|entry| &entry.provenance)
    }

    /// Interpret a scalar key as a boolean flag.
    ///
    /// `true`, `yes`, `on` and `1` are accepted, ignoring case.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.scalar(key).is_some_and(|value| {
            ["true", "yes", "on", "1"]
                .iter()
                .any(|truthy| value.trim().eq_ignore_ascii_case(truthy))
        })
    }

    /// Requested suite name, if any.
    #[must_use]
    pub fn suite(&self) -> Option<&str> {
        self.non_empty(SUITE)
    }

    /// Configured suites directory, if any.
    #[must_use]
    pub fn suites_directory(&self) -> Option<Utf8PathBuf> {
        self.non_empty(SUITES_DIRECTORY).map(Utf8PathBuf::from)
    }

    /// Prefixed keys that matched no declaration.
    #[must_use]
    pub fn unrecognised(&self) -> &[UnrecognisedKey] {
        &self.unrecognised
    }

    /// Iterate over every resolved entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.scalar(key).filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn with_scalar(key: &str, value: &str) -> ResolvedConfiguration {
        let mut entries = BTreeMap::new();
        entries.insert(
            key.to_owned(),
            ResolvedEntry {
                value: ConfigValue::Scalar(value.to_owned()),
                provenance: Provenance::single(Tier::Cli),
            },
        );
        ResolvedConfiguration::new(entries, Vec::new())
    }

    #[rstest]
    #[case("true", true)]
    #[case("YES", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("", false)]
    fn flags_accept_common_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(with_scalar("stop", raw).flag("stop"), expected);
    }

    #[test]
    fn blank_suite_is_treated_as_absent() {
        assert_eq!(with_scalar(SUITE, "  ").suite(), None);
        assert_eq!(with_scalar(SUITE, "mock").suite(), Some("mock"));
    }

    #[test]
    fn list_of_missing_key_is_empty() {
        let config = ResolvedConfiguration::default();
        assert!(config.list("tags").is_empty());
        assert!(config.provenance("tags").is_none());
    }

    #[test]
    fn provenance_reports_winning_tier() {
        let mut provenance = Provenance::single(Tier::ProjectFile);
        provenance.push(Tier::Cli);
        assert_eq!(provenance.winning(), Some(Tier::Cli));
        assert!(!provenance.is_default());
        assert!(Provenance::default_value().is_default());
    }
}
