//! The `ndarray-dictlearn` crate provides the iterative convex solvers
//! used in sparse-coding and dictionary-learning pipelines, operating on
//! dense `ndarray` matrices.
//!
//! It includes:
//! - a block-coordinate-descent update of a dictionary under a unit-norm
//!   per-atom constraint (Online Dictionary Learning style),
//! - an ADMM update adding a subspace-incoherence penalty (DLSI style),
//! - an accelerated proximal-gradient engine (FISTA) and its LASSO
//!   instantiation for computing sparse codes.
//!
//! All solvers are single-threaded batch computations over whole
//! in-memory matrices: each call takes the problem data, iterates to a
//! tolerance or a cap, and returns the final matrix. Running out of
//! iterations is a best-effort return, never an error; malformed shapes
//! are rejected up front instead.
//!
//! Every solver accepts an observer callback evaluated once per
//! iteration with the current iterate; pass [`nop`] when no diagnostics
//! are wanted, or return `true` from the callback to terminate early.

pub mod dict;
pub mod error;
pub mod prox;
pub mod utils;

pub use error::{DictLearnError, Result};

use ndarray::ArrayView;

/// Do nothing function for optional solver callback (returns false)
#[allow(clippy::needless_pass_by_value)]
pub fn nop<T, D>(_x: ArrayView<T, D>, _itr: usize) -> bool {
    false
}
