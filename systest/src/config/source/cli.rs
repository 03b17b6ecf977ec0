//! Command-line tier values, received already parsed.

use std::collections::BTreeMap;

/// A value supplied on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliValue {
    /// A single flag value.
    Scalar(String),
    /// Repeated flag values or positional arguments, in order.
    Multi(Vec<String>),
}

/// The command-line tier: a structured bag of values keyed by config key.
///
/// Values are taken verbatim; nothing here is re-tokenised.
///
/// # Examples
///
/// ```
/// use systest::config::{CliValue, CliValues};
///
/// let cli = CliValues::new()
///     .with("suite", "mock")
///     .with_list("tags", ["@smoke"]);
/// assert_eq!(cli.get("suite"), Some(&CliValue::Scalar("mock".into())));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CliValues {
    values: BTreeMap<String, CliValue>,
}

impl CliValues {
    /// Create an empty command-line tier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar value, replacing any earlier one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), CliValue::Scalar(value.into()));
    }

    /// Set a scalar value when `value` is present.
    pub fn set_opt<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(present) = value {
            self.set(key, present);
        }
    }

    /// Set a boolean flag when it was given.
    pub fn set_flag(&mut self, key: impl Into<String>, given: bool) {
        if given {
            self.set(key, "true");
        }
    }

    /// Append values to a multi-valued key.
    ///
    /// An empty iterator leaves the key unset so that lower tiers still
    /// apply.
    pub fn extend<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut incoming = values.into_iter().map(Into::into).peekable();
        if incoming.peek().is_none() {
            return;
        }
        let entry = self
            .values
            .entry(key.into())
            .or_insert_with(|| CliValue::Multi(Vec::new()));
        match *entry {
            CliValue::Multi(ref mut existing) => existing.extend(incoming),
            CliValue::Scalar(_) => *entry = CliValue::Multi(incoming.collect()),
        }
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`Self::extend`].
    #[must_use]
    pub fn with_list<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.extend(key, values);
        self
    }

    /// Value supplied for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CliValue> {
        self.values.get(key)
    }

    /// Iterate over all supplied values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CliValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns `true` when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
