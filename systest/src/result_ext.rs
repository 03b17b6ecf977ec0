//! Extensions for mapping foreign errors into `SystestResult` concisely.
//!
//! Filesystem calls are the main source of foreign errors in this crate, and
//! every one of them needs the offending path attached. [`IoResultExt`]
//! removes the repetitive `.map_err(|e| SystestError::io(path, e))` noise.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use systest::{IoResultExt, SystestResult};
//!
//! fn read(path: &Utf8Path) -> SystestResult<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use camino::Utf8Path;

use crate::{SystestError, SystestResult};

/// Attach a path to [`std::io::Error`] results.
pub trait IoResultExt<T> {
    /// Convert `io::Result<T>` into `SystestResult<T>` naming `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SystestError::Io`] wrapped in an `Arc` when the input is `Err`.
    fn with_path(self, path: &Utf8Path) -> SystestResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: &Utf8Path) -> SystestResult<T> {
        self.map_err(|e| SystestError::io(path, e))
    }
}
