//! Resolved configuration values.

use serde::Serialize;

/// Value resolved for a single key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Value of a scalar key. Unset scalars resolve to their declared default.
    Scalar(String),
    /// Ordered tokens of a multi-valued key.
    Multi(Vec<String>),
}

impl ConfigValue {
    /// Returns the scalar string, or `None` for multi-valued values.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    /// Returns the token list, or `None` for scalar values.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::Multi(values) => Some(values),
        }
    }
}
