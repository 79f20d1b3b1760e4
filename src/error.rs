//! Error types for the solver entry points

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DictLearnError>;

/// Failures surfaced at the public call boundaries.
///
/// Running out of iterations is *not* an error anywhere in this crate:
/// every solver returns its best iterate when the cap is exhausted.
#[derive(Debug, Error)]
pub enum DictLearnError {
    /// Matrix arguments do not have compatible shapes
    #[error("{what} must have shape {expected:?}, got {found:?}")]
    InvalidDimensions {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A diagnostic was requested before any data was bound with `fit`
    #[error("no data has been bound, call `fit` first")]
    NotFitted,
    #[error(transparent)]
    Linalg(#[from] linfa_linalg::LinalgError),
}
