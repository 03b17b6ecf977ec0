//! Configuration tiers in ascending priority order.

use std::fmt;

use serde::Serialize;

/// Source tier of a configuration value.
///
/// The derived ordering matches precedence: a later variant overrides an
/// earlier one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Process environment variables.
    Environment,
    /// The user's home configuration file.
    UserFile,
    /// The project-local configuration file.
    ProjectFile,
    /// A configuration file named explicitly on the command line.
    ExplicitFile,
    /// Values parsed from command-line flags and positional arguments.
    Cli,
}

impl Tier {
    /// All tiers, lowest priority first.
    pub const ALL: [Self; 5] = [
        Self::Environment,
        Self::UserFile,
        Self::ProjectFile,
        Self::ExplicitFile,
        Self::Cli,
    ];

    /// Returns `true` for the tiers that hold raw, unparsed strings.
    #[must_use]
    pub const fn is_raw(self) -> bool {
        !matches!(self, Self::Cli)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Environment => "environment",
            Self::UserFile => "user configuration file",
            Self::ProjectFile => "project configuration file",
            Self::ExplicitFile => "explicit configuration file",
            Self::Cli => "command line",
        })
    }
}
