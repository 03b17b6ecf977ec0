//! Glob expansion over the filesystem.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use globset::GlobBuilder;
use walkdir::WalkDir;

use super::TargetOrigin;
use crate::{SystestError, SystestResult};

const MAGIC: [char; 3] = ['*', '?', '['];

/// Returns `true` when `pattern` contains glob metacharacters.
pub(crate) fn has_magic(pattern: &str) -> bool {
    pattern.contains(MAGIC)
}

/// A path matched by a glob.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GlobMatch {
    pub(crate) path: Utf8PathBuf,
    pub(crate) is_dir: bool,
}

/// Expand the absolute `pattern` into matching paths in file-name order.
///
/// `*` and `?` never cross a `/`; `**` matches any number of directories.
/// Hidden entries are not matched.
pub(crate) fn expand(
    pattern: &Utf8Path,
    expression: &str,
    origin: &TargetOrigin,
) -> SystestResult<Vec<GlobMatch>> {
    let matcher = GlobBuilder::new(pattern.as_str())
        .literal_separator(true)
        .build()
        .map_err(|err| SystestError::invalid_target(expression, origin, err.to_string()))?
        .compile_matcher();
    let (root, depth) = walk_root(pattern);
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.file_name().to_string_lossy().starts_with('.'));
    let mut matches = Vec::new();
    for entry in walker.filter_map(Result::ok) {
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            continue;
        };
        if matcher.is_match(path.as_str()) {
            matches.push(GlobMatch {
                path: path.to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }
    }
    Ok(matches)
}

/// Longest literal prefix of `pattern` and how deep below it to search.
fn walk_root(pattern: &Utf8Path) -> (Utf8PathBuf, usize) {
    let mut root = Utf8PathBuf::new();
    let mut remaining = 0_usize;
    let mut recursive = false;
    let mut literal = true;
    for component in pattern.components() {
        let text = component.as_str();
        if literal && !has_magic(text) {
            root.push(text);
            continue;
        }
        literal = false;
        if matches!(component, Utf8Component::Normal(_)) {
            remaining += 1;
            recursive |= text.contains("**");
        }
    }
    let depth = if recursive { usize::MAX } else { remaining };
    (root, depth)
}
