//! Several independent failures reported as one error.

use std::{error::Error, fmt, sync::Arc};

use super::SystestError;

/// Failures gathered from independent inputs, such as several target
/// expressions, kept in the order they were found.
#[derive(Debug)]
pub struct AggregatedErrors(Vec<Arc<SystestError>>);

impl AggregatedErrors {
    /// Wrap `errors` without reordering them.
    #[must_use]
    pub const fn new(errors: Vec<Arc<SystestError>>) -> Self {
        Self(errors)
    }

    /// The gathered errors, in order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &SystestError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// How many errors were gathered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was gathered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut numbered = (1..).zip(self.iter());
        if let Some((number, first)) = numbered.next() {
            write!(f, "{number}: {first}")?;
        }
        for (number, err) in numbered {
            write!(f, "\n{number}: {err}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
