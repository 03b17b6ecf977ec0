//! Configuration resolution across five prioritised tiers.
//!
//! Values are read by the [`ConfigLoader`] into one [`SourceLayer`] per
//! tier, combined with the already-parsed [`CliValues`] by the
//! [`MergeEngine`], and frozen into a [`ResolvedConfiguration`]. How each key
//! merges is declared once in the static [`keys::KEYS`] table.

pub mod keys;
mod merge;
mod properties;
mod resolved;
mod source;
mod tier;
mod tokenizer;
mod value;

pub use keys::{ConfigKey, MergePolicy, ValueKind};
pub use merge::{MergeEngine, merge_sources};
pub use properties::{PropertyLine, parse_properties, unquote};
pub use resolved::{Provenance, ResolvedConfiguration, ResolvedEntry, UnrecognisedKey};
pub use source::{
    CliValue, CliValues, ConfigLoader, ENV_PREFIX, LoadedSources, PROJECT_CONFIG_FILE, RawEntry,
    SourceLayer, USER_CONFIG_FILE, normalise_key,
};
pub use tier::Tier;
pub use tokenizer::{join, tokenize};
pub use value::ConfigValue;
