//! Combines the five tiers into a [`ResolvedConfiguration`].
//!
//! Each key is resolved independently according to its declaration:
//!
//! * scalars and override lists take the value of the highest tier that
//!   defines them;
//! * additive lists take the override result of the raw tiers as a base and
//!   append the command-line values unchanged;
//! * keys set nowhere take their declared default.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::keys::{self, ConfigKey, KEYS, MergePolicy, ValueKind};
use super::{
    CliValue, CliValues, ConfigValue, LoadedSources, Provenance, RawEntry, ResolvedConfiguration,
    ResolvedEntry, SourceLayer, Tier, UnrecognisedKey, tokenize, unquote,
};
use crate::{SystestError, SystestResult};

/// Merges configuration tiers according to a static key table.
#[derive(Clone, Copy, Debug)]
pub struct MergeEngine<'t> {
    table: &'t [ConfigKey],
}

impl Default for MergeEngine<'static> {
    fn default() -> Self {
        Self::new(KEYS)
    }
}

impl<'t> MergeEngine<'t> {
    /// Create an engine for `table`.
    #[must_use]
    pub const fn new(table: &'t [ConfigKey]) -> Self {
        Self { table }
    }

    /// Merge the raw tiers in `sources` with the command-line tier.
    ///
    /// Every problem found is collected before failing, so one run reports
    /// all misplaced keys and quoting errors at once.
    ///
    /// # Errors
    ///
    /// Returns an error when a command-line-only key appears in a raw tier,
    /// when the command line names an undeclared key or supplies a list for
    /// a scalar, or when a multi-valued entry cannot be tokenised.
    pub fn merge(
        &self,
        sources: &LoadedSources,
        cli: &CliValues,
    ) -> SystestResult<ResolvedConfiguration> {
        let mut errors = Vec::new();
        let unrecognised = self.scan_layers(sources, &mut errors);
        self.check_cli(cli, &mut errors);

        let mut entries = BTreeMap::new();
        for key in self.table {
            match resolve_key(key, sources, cli.get(key.name())) {
                Ok(entry) => {
                    debug!(
                        key = key.name(),
                        provenance = ?entry.provenance.tiers(),
                        "resolved configuration key"
                    );
                    entries.insert(key.name().to_owned(), entry);
                }
                Err(err) => errors.push(err),
            }
        }
        SystestError::check_collected(errors)?;
        Ok(ResolvedConfiguration::new(entries, unrecognised))
    }

    fn scan_layers(
        &self,
        sources: &LoadedSources,
        errors: &mut Vec<Arc<SystestError>>,
    ) -> Vec<UnrecognisedKey> {
        let mut unrecognised = Vec::new();
        for layer in sources.layers() {
            for entry in layer.entries() {
                match keys::lookup(self.table, &entry.key) {
                    None => {
                        warn!(
                            tier = %layer.tier(),
                            key = %entry.key,
                            "ignoring unrecognised configuration key"
                        );
                        unrecognised.push(UnrecognisedKey {
                            tier: layer.tier(),
                            key: entry.key.clone(),
                            path: layer.path().map(ToOwned::to_owned),
                            line: entry.line,
                        });
                    }
                    Some(key) if key.is_cli_only() => errors.push(SystestError::config(
                        key.name(),
                        format!(
                            "may only be given on the command line, found in the {}",
                            describe_location(layer, entry.line)
                        ),
                    )),
                    Some(_) => {}
                }
            }
        }
        unrecognised
    }

    fn check_cli(&self, cli: &CliValues, errors: &mut Vec<Arc<SystestError>>) {
        for (name, value) in cli.iter() {
            match keys::lookup(self.table, name) {
                None => errors.push(SystestError::config(name, "unknown command-line option")),
                Some(key) if !key.is_multi() && matches!(value, CliValue::Multi(_)) => {
                    errors.push(SystestError::config(name, "expects a single value"));
                }
                Some(_) => {}
            }
        }
    }
}

fn describe_location(layer: &SourceLayer, line: Option<usize>) -> String {
    match (layer.path(), line) {
        (Some(path), Some(number)) => format!("{} '{path}' at line {number}", layer.tier()),
        (Some(path), None) => format!("{} '{path}'", layer.tier()),
        _ => layer.tier().to_string(),
    }
}

fn resolve_key(
    key: &ConfigKey,
    sources: &LoadedSources,
    cli: Option<&CliValue>,
) -> SystestResult<ResolvedEntry> {
    let raw = sources
        .highest(key.name())
        .filter(|_| !key.is_cli_only());
    match key.value_kind() {
        ValueKind::Scalar => Ok(resolve_scalar(key, raw, cli)),
        ValueKind::Multi(MergePolicy::Override) => {
            if let Some(values) = cli {
                return Ok(cli_list(values));
            }
            raw_list(key, raw)
        }
        ValueKind::Multi(MergePolicy::Additive) => {
            let mut entry = raw_list(key, raw)?;
            if let Some(values) = cli {
                if let ConfigValue::Multi(ref mut list) = entry.value {
                    list.extend(cli_tokens(values));
                }
                entry.provenance.push(Tier::Cli);
            }
            Ok(entry)
        }
    }
}

fn resolve_scalar(
    key: &ConfigKey,
    raw: Option<(Tier, &RawEntry)>,
    cli: Option<&CliValue>,
) -> ResolvedEntry {
    if let Some(CliValue::Scalar(value)) = cli {
        return ResolvedEntry {
            value: ConfigValue::Scalar(value.clone()),
            provenance: Provenance::single(Tier::Cli),
        };
    }
    raw.map_or_else(
        || ResolvedEntry {
            value: key.default_value(),
            provenance: Provenance::default_value(),
        },
        |(tier, entry)| ResolvedEntry {
            value: ConfigValue::Scalar(unquote(&entry.value).to_owned()),
            provenance: Provenance::single(tier),
        },
    )
}

fn raw_list(
    key: &ConfigKey,
    raw: Option<(Tier, &RawEntry)>,
) -> SystestResult<ResolvedEntry> {
    match raw {
        Some((tier, entry)) => Ok(ResolvedEntry {
            value: ConfigValue::Multi(tokenize(&entry.value, tier)?),
            provenance: Provenance::single(tier),
        }),
        None => Ok(ResolvedEntry {
            value: key.default_value(),
            provenance: Provenance::default_value(),
        }),
    }
}

fn cli_tokens(value: &CliValue) -> Vec<String> {
    match value {
        CliValue::Scalar(single) => vec![single.clone()],
        CliValue::Multi(values) => values.clone(),
    }
}

fn cli_list(value: &CliValue) -> ResolvedEntry {
    ResolvedEntry {
        value: ConfigValue::Multi(cli_tokens(value)),
        provenance: Provenance::single(Tier::Cli),
    }
}

/// Merge `sources` and `cli` using the built-in key table.
///
/// # Errors
///
/// See [`MergeEngine::merge`].
pub fn merge_sources(
    sources: &LoadedSources,
    cli: &CliValues,
) -> SystestResult<ResolvedConfiguration> {
    MergeEngine::default().merge(sources, cli)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::config::keys::{LANG, LOGGING_LEVEL, PATHS, STEPS_DIR, SUITE, TAGS};

    #[fixture]
    fn layered() -> LoadedSources {
        LoadedSources::new([
            SourceLayer::from_pairs(
                Tier::Environment,
                [("lang", "de"), ("tags", "@env"), ("paths", "env_area")],
            ),
            SourceLayer::from_pairs(Tier::UserFile, [("lang", "'it'")]),
            SourceLayer::from_pairs(
                Tier::ProjectFile,
                [("tags", "@project '@with space'"), ("paths", "a b")],
            ),
        ])
    }

    #[rstest]
    fn highest_tier_wins_for_scalars(layered: LoadedSources) {
        let config = merge_sources(&layered, &CliValues::new()).expect("merge");
        assert_eq!(config.scalar(LANG), Some("it"));
        assert_eq!(
            config.provenance(LANG).and_then(Provenance::winning),
            Some(Tier::UserFile)
        );

        let cli = CliValues::new().with(LANG, "fr");
        let overridden = merge_sources(&layered, &cli).expect("merge");
        assert_eq!(overridden.scalar(LANG), Some("fr"));
    }

    #[rstest]
    fn additive_lists_append_cli_values_without_dedup(layered: LoadedSources) {
        let cli = CliValues::new().with_list(TAGS, ["@project", "@cli"]);
        let config = merge_sources(&layered, &cli).expect("merge");
        assert_eq!(
            config.list(TAGS),
            ["@project", "@with space", "@project", "@cli"]
        );
        assert_eq!(
            config.provenance(TAGS).map(Provenance::tiers),
            Some(&[Tier::ProjectFile, Tier::Cli][..])
        );
    }

    #[rstest]
    fn override_lists_are_replaced_by_the_cli(layered: LoadedSources) {
        let untouched = merge_sources(&layered, &CliValues::new()).expect("merge");
        assert_eq!(untouched.list(PATHS), ["a", "b"]);

        let cli = CliValues::new().with_list(PATHS, ["login"]);
        let config = merge_sources(&layered, &cli).expect("merge");
        assert_eq!(config.list(PATHS), ["login"]);
    }

    #[test]
    fn unset_keys_take_defaults() {
        let config = merge_sources(&LoadedSources::default(), &CliValues::new()).expect("merge");
        assert_eq!(config.scalar(STEPS_DIR), Some("steps"));
        assert_eq!(config.scalar(LOGGING_LEVEL), Some("ERROR"));
        assert!(config.list(TAGS).is_empty());
        assert!(config.provenance(TAGS).is_some_and(Provenance::is_default));
        for key in KEYS {
            assert!(config.get(key.name()).is_some(), "{} unresolved", key.name());
        }
    }

    #[test]
    fn additive_default_is_the_base_list() {
        static TABLE: &[ConfigKey] =
            &[ConfigKey::multi("format", MergePolicy::Additive).with_list_default(&["pretty"])];
        let cli = CliValues::new().with_list("format", ["json"]);
        let config = MergeEngine::new(TABLE)
            .merge(&LoadedSources::default(), &cli)
            .expect("merge");
        assert_eq!(config.list("format"), ["pretty", "json"]);
    }

    #[test]
    fn cli_only_keys_are_rejected_from_files() {
        let sources =
            LoadedSources::new([SourceLayer::from_pairs(Tier::ProjectFile, [(SUITE, "mock")])]);
        let err = merge_sources(&sources, &CliValues::new()).expect_err("must fail");
        assert!(matches!(err.as_ref(), SystestError::Config { key, .. } if key == SUITE));
    }

    #[test]
    fn unrecognised_keys_are_reported_not_dropped() {
        let sources =
            LoadedSources::new([SourceLayer::from_pairs(Tier::Environment, [("colour", "red")])]);
        let config = merge_sources(&sources, &CliValues::new()).expect("merge");
        let keys: Vec<&str> = config
            .unrecognised()
            .iter()
            .map(|key| key.key.as_str())
            .collect();
        assert_eq!(keys, ["colour"]);
    }

    #[test]
    fn quoting_errors_in_every_key_are_collected() {
        let sources = LoadedSources::new([SourceLayer::from_pairs(
            Tier::UserFile,
            [("tags", "'open"), ("name", "\"also open")],
        )]);
        let err = merge_sources(&sources, &CliValues::new()).expect_err("must fail");
        match err.as_ref() {
            SystestError::Aggregate(agg) => assert_eq!(agg.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(CliValues::new().with("colour", "red"))]
    #[case(CliValues::new().with_list(LANG, ["de", "fr"]))]
    fn malformed_cli_values_are_rejected(#[case] cli: CliValues) {
        let err = merge_sources(&LoadedSources::default(), &cli).expect_err("must fail");
        assert!(matches!(err.as_ref(), SystestError::Config { .. }));
    }
}
