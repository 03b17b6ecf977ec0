//! Reads the environment and configuration-file tiers.
//!
//! Every input location can be overridden through the builder so callers
//! (and tests) decide exactly which environment and files are consulted.

use camino::{Utf8Path, Utf8PathBuf};
use figment::providers::Env;
use tracing::debug;

use super::{
    ENV_PREFIX, LoadedSources, PROJECT_CONFIG_FILE, SourceLayer, USER_CONFIG_FILE, normalise_key,
};
use crate::config::keys::CONFIG;
use crate::config::{Tier, parse_properties};
use crate::{IoResultExt, SystestError, SystestResult};

#[derive(Clone, Debug)]
enum EnvSource {
    Process,
    Pairs(Vec<(String, String)>),
}

/// Loader for tiers one to four.
///
/// # Examples
///
/// ```rust,no_run
/// use systest::config::ConfigLoader;
///
/// # fn run() -> systest::SystestResult<()> {
/// let sources = ConfigLoader::new()
///     .explicit_file("ci.systest")
///     .load()?;
/// for layer in sources.layers() {
///     println!("{}: {} entries", layer.tier(), layer.entries().len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    env: EnvSource,
    home_dir: Option<Utf8PathBuf>,
    project_dir: Option<Utf8PathBuf>,
    explicit_file: Option<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading the process environment, the user's home
    /// directory and the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: EnvSource::Process,
            home_dir: dirs::home_dir().and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok()),
            project_dir: std::env::current_dir()
                .ok()
                .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok()),
            explicit_file: None,
        }
    }

    /// Replaces the process environment with explicit `(name, value)` pairs.
    ///
    /// Names use the same `SYSTEST_` convention as real variables.
    #[must_use]
    pub fn env_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvSource::Pairs(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Sets the directory searched for the user configuration file.
    #[must_use]
    pub fn home_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Skips the user configuration file.
    #[must_use]
    pub fn without_home_dir(mut self) -> Self {
        self.home_dir = None;
        self
    }

    /// Sets the directory searched for the project configuration file.
    #[must_use]
    pub fn project_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Skips the project configuration file.
    #[must_use]
    pub fn without_project_dir(mut self) -> Self {
        self.project_dir = None;
        self
    }

    /// Sets the explicitly requested configuration file. It must exist.
    #[must_use]
    pub fn explicit_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Sets or clears the explicitly requested configuration file.
    #[must_use]
    pub fn maybe_explicit_file(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.explicit_file = path;
        self
    }

    /// Path of the user configuration file, when a home directory is known.
    #[must_use]
    pub fn user_file(&self) -> Option<Utf8PathBuf> {
        self.home_dir.as_ref().map(|dir| dir.join(USER_CONFIG_FILE))
    }

    /// Path of the project configuration file, when a project directory is known.
    #[must_use]
    pub fn project_file(&self) -> Option<Utf8PathBuf> {
        self.project_dir
            .as_ref()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
    }

    /// Reads all four raw tiers.
    ///
    /// Absent user and project files are skipped. Errors from every file are
    /// collected and reported together.
    ///
    /// # Errors
    ///
    /// Returns an error when the explicit file is missing, or when a present
    /// file cannot be read or is malformed.
    pub fn load(&self) -> SystestResult<LoadedSources> {
        let mut layers = vec![self.environment_layer()];
        let mut errors = Vec::new();
        let candidates = [
            (Tier::UserFile, self.user_file(), false),
            (Tier::ProjectFile, self.project_file(), false),
            (Tier::ExplicitFile, self.explicit_file.clone(), true),
        ];
        for (tier, path, required) in candidates {
            let Some(file) = path else { continue };
            match load_file_layer(tier, &file, required) {
                Ok(Some(layer)) => layers.push(layer),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }
        SystestError::check_collected(errors)?;
        Ok(LoadedSources::new(layers))
    }

    fn environment_layer(&self) -> SourceLayer {
        let mut layer = SourceLayer::new(Tier::Environment, None);
        match &self.env {
            EnvSource::Process => {
                for (key, value) in Env::prefixed(ENV_PREFIX).iter() {
                    push_value(&mut layer, key.as_str().to_ascii_lowercase(), &value, None);
                }
            }
            EnvSource::Pairs(pairs) => {
                for (name, value) in pairs {
                    if let Some(key) = normalise_key(name) {
                        push_value(&mut layer, key, value, None);
                    }
                }
            }
        }
        layer
    }
}

fn load_file_layer(
    tier: Tier,
    path: &Utf8Path,
    required: bool,
) -> SystestResult<Option<SourceLayer>> {
    if !path.is_file() {
        if required {
            return Err(SystestError::config(
                CONFIG,
                format!("configuration file not found: '{path}'"),
            ));
        }
        debug!(%tier, %path, "skipping absent configuration file");
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).with_path(path)?;
    let mut layer = SourceLayer::new(tier, Some(path.to_path_buf()));
    for entry in parse_properties(path, &contents)? {
        if let Some(key) = normalise_key(&entry.key) {
            push_value(&mut layer, key, &entry.value, Some(entry.line));
        }
    }
    debug!(%tier, %path, entries = layer.entries().len(), "loaded configuration file");
    Ok(Some(layer))
}

fn push_value(layer: &mut SourceLayer, key: String, value: &str, line: Option<usize>) {
    if key.is_empty() {
        return;
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        debug!(tier = %layer.tier(), %key, "ignoring blank value");
        return;
    }
    layer.push(key, trimmed, line);
}
