//! Sorted directory listings.

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::{SystestError, SystestResult};

/// A direct child of a listed directory.
#[derive(Clone, Debug)]
pub(crate) struct Listed {
    pub(crate) path: Utf8PathBuf,
    pub(crate) is_dir: bool,
}

impl Listed {
    pub(crate) fn stem(&self) -> Option<&str> {
        self.path.file_stem()
    }

    pub(crate) fn has_extension(&self, extension: &str) -> bool {
        !self.is_dir && self.path.extension() == Some(extension)
    }
}

/// Direct children of `dir` in file-name order.
///
/// Hidden entries and non-UTF-8 names are skipped.
pub(crate) fn list_dir(dir: &Utf8Path) -> SystestResult<Vec<Listed>> {
    walk(dir, 1)
}

/// Every descendant of `dir`, depth first, in file-name order.
pub(crate) fn list_tree(dir: &Utf8Path) -> SystestResult<Vec<Listed>> {
    walk(dir, usize::MAX)
}

fn walk(dir: &Utf8Path, depth: usize) -> SystestResult<Vec<Listed>> {
    let mut listed = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let found = entry.map_err(|err| {
            let path = err
                .path()
                .and_then(Utf8Path::from_path)
                .unwrap_or(dir)
                .to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            SystestError::io(&path, source)
        })?;
        let Ok(path) = Utf8PathBuf::from_path_buf(found.path().to_path_buf()) else {
            continue;
        };
        listed.push(Listed {
            path,
            is_dir: found.file_type().is_dir(),
        });
    }
    Ok(listed)
}
