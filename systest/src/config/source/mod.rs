//! Raw configuration sources, one layer per tier.

mod cli;
mod loader;

use camino::{Utf8Path, Utf8PathBuf};

use super::Tier;

pub use cli::{CliValue, CliValues};
pub use loader::ConfigLoader;

/// Prefix marking a variable or file entry as a systest setting.
pub const ENV_PREFIX: &str = "SYSTEST_";
/// File name of the user configuration file inside the home directory.
pub const USER_CONFIG_FILE: &str = ".systest";
/// File name of the project configuration file inside the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".env";

/// Convert a variable name such as `SYSTEST_TAGS` into the key `tags`.
///
/// Matching of the prefix is case-insensitive. Returns `None` for names
/// without the prefix or with nothing after it.
///
/// # Examples
///
/// ```
/// use systest::config::normalise_key;
///
/// assert_eq!(normalise_key("SYSTEST_DRY_RUN").as_deref(), Some("dry_run"));
/// assert_eq!(normalise_key("systest_tags").as_deref(), Some("tags"));
/// assert_eq!(normalise_key("HOME"), None);
/// ```
#[must_use]
pub fn normalise_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let head = trimmed.get(..ENV_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(ENV_PREFIX) {
        return None;
    }
    let rest = trimmed.get(ENV_PREFIX.len()..)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_ascii_lowercase())
}

/// A raw value read from one tier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawEntry {
    /// Normalised key name.
    pub key: String,
    /// Raw value, trimmed.
    pub value: String,
    /// Line number for file tiers.
    pub line: Option<usize>,
}

/// Raw entries contributed by a single tier.
#[derive(Clone, Debug)]
pub struct SourceLayer {
    tier: Tier,
    path: Option<Utf8PathBuf>,
    entries: Vec<RawEntry>,
}

impl SourceLayer {
    /// Create an empty layer for `tier`, optionally backed by a file.
    #[must_use]
    pub const fn new(tier: Tier, path: Option<Utf8PathBuf>) -> Self {
        Self {
            tier,
            path,
            entries: Vec::new(),
        }
    }

    /// Build a layer from already-normalised `(key, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(tier: Tier, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut layer = Self::new(tier, None);
        for (key, value) in pairs {
            layer.push(key, value, None);
        }
        layer
    }

    /// Append an entry. Later entries for the same key take precedence.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>, line: Option<usize>) {
        self.entries.push(RawEntry {
            key: key.into(),
            value: value.into(),
            line,
        });
    }

    /// Tier this layer was read from.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// All entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    /// The effective entry for `key` within this layer.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawEntry> {
        self.entries.iter().rev().find(|entry| entry.key == key)
    }
}

/// The raw tiers below the command line, ordered lowest priority first.
#[derive(Clone, Debug, Default)]
pub struct LoadedSources {
    layers: Vec<SourceLayer>,
}

impl LoadedSources {
    /// Collect `layers`, ordering them by tier.
    ///
    /// Layers claiming the [`Tier::Cli`] tier are discarded; command-line
    /// values travel separately as [`CliValues`].
    #[must_use]
    pub fn new(layers: impl IntoIterator<Item = SourceLayer>) -> Self {
        let mut collected: Vec<SourceLayer> = layers
            .into_iter()
            .filter(|layer| layer.tier().is_raw())
            .collect();
        collected.sort_by_key(SourceLayer::tier);
        Self { layers: collected }
    }

    /// Layers, lowest priority first.
    #[must_use]
    pub fn layers(&self) -> &[SourceLayer] {
        &self.layers
    }

    /// The highest-priority entry for `key` together with its tier.
    #[must_use]
    pub fn highest(&self, key: &str) -> Option<(Tier, &RawEntry)> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(key).map(|entry| (layer.tier(), entry)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("SYSTEST_TAGS", Some("tags"))]
    #[case("Systest_Suites_Directory", Some("suites_directory"))]
    #[case("  SYSTEST_STOP ", Some("stop"))]
    #[case("SYSTEST_", None)]
    #[case("PATH", None)]
    #[case("SYS", None)]
    fn normalises_prefixed_names(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalise_key(raw).as_deref(), expected);
    }

    #[test]
    fn later_entries_win_within_a_layer() {
        let layer = SourceLayer::from_pairs(Tier::UserFile, [("tags", "a"), ("tags", "b")]);
        assert_eq!(layer.get("tags").map(|e| e.value.as_str()), Some("b"));
    }

    #[test]
    fn highest_tier_is_found_regardless_of_input_order() {
        let sources = LoadedSources::new([
            SourceLayer::from_pairs(Tier::ExplicitFile, [("lang", "fr")]),
            SourceLayer::from_pairs(Tier::Environment, [("lang", "de")]),
            SourceLayer::from_pairs(Tier::ProjectFile, [("lang", "it")]),
        ]);
        let (tier, entry) = sources.highest("lang").expect("lang defined");
        assert_eq!(tier, Tier::ExplicitFile);
        assert_eq!(entry.value, "fr");
    }

    #[test]
    fn cli_layers_are_not_raw_sources() {
        let sources = LoadedSources::new([SourceLayer::from_pairs(Tier::Cli, [("lang", "fr")])]);
        assert!(sources.layers().is_empty());
    }
}
