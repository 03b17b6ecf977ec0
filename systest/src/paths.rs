//! Small path helpers shared by the locator and the resolver.

use camino::{Utf8Path, Utf8PathBuf};

use crate::{IoResultExt, SystestError, SystestResult};

/// The process working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns an error when the working directory is unavailable or not UTF-8.
pub(crate) fn current_dir() -> SystestResult<Utf8PathBuf> {
    let cwd = std::env::current_dir().with_path(Utf8Path::new("."))?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|raw| {
        SystestError::io(
            Utf8Path::new("."),
            std::io::Error::other(format!(
                "working directory is not valid UTF-8: {}",
                raw.display()
            )),
        )
    })
}

/// Join `path` onto `base` unless it is already absolute.
pub(crate) fn anchored(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
