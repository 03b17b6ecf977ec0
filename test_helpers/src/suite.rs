//! Builders for on-disk suite trees.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Number of lines in generated feature files.
pub const FEATURE_LINES: usize = 20;

/// A temporary suites directory that is removed on drop.
#[derive(Debug)]
pub struct SuiteTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SuiteTree {
    /// Creates an empty suites directory.
    ///
    /// The path is canonicalised so comparisons with resolved paths hold on
    /// platforms where the temporary directory is a symlink.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary suites directory")?;
        let canonical = dir
            .path()
            .canonicalize()
            .context("canonicalise temporary suites directory")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|path| anyhow::anyhow!("non UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// The suites directory.
    #[must_use]
    pub fn suites_dir(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory of the suite called `name`.
    #[must_use]
    pub fn suite_dir(&self, name: &str) -> Utf8PathBuf {
        self.root.join(format!("{name}_suite"))
    }

    /// Features folder of the suite called `name`.
    #[must_use]
    pub fn features_dir(&self, name: &str) -> Utf8PathBuf {
        self.suite_dir(name).join("features")
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Creates the directory `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn mkdir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Removes the file or directory `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when removal fails.
    pub fn remove(&self, relative: &str) -> Result<()> {
        let path = self.root.join(relative);
        if path.is_dir() {
            std::fs::remove_dir_all(&path).with_context(|| format!("remove {path}"))
        } else {
            std::fs::remove_file(&path).with_context(|| format!("remove {path}"))
        }
    }

    /// Adds a feature area with one feature file and one step module to the
    /// suite called `suite`.
    ///
    /// # Errors
    ///
    /// Returns an error when a file cannot be written.
    pub fn add_area(&self, suite: &str, area: &str) -> Result<Utf8PathBuf> {
        let base = format!("{suite}_suite/features/{area}");
        self.write(&format!("{base}/{area}.feature"), &feature_text(area, FEATURE_LINES))?;
        self.write(&format!("{base}/steps/{area}_steps.py"), "")?;
        Ok(self.root.join(base))
    }

    /// Creates a structurally valid suite called `name` with `areas`.
    ///
    /// # Errors
    ///
    /// Returns an error when a file cannot be written.
    pub fn valid_suite(&self, name: &str, areas: &[&str]) -> Result<Utf8PathBuf> {
        self.write(&format!("{name}_suite/support/__init__.py"), "")?;
        self.mkdir(&format!("{name}_suite/features"))?;
        for area in areas {
            self.add_area(name, area)?;
        }
        Ok(self.suite_dir(name))
    }
}

/// Gherkin text for a feature called `title`, padded to `lines` lines.
#[must_use]
pub fn feature_text(title: &str, lines: usize) -> String {
    let mut text = vec![
        format!("Feature: {title}"),
        String::new(),
        "  Scenario: first".to_owned(),
        "    Given a step".to_owned(),
    ];
    while text.len() < lines {
        text.push(String::new());
    }
    text.join("\n") + "\n"
}
