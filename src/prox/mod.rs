//! Minimization for Composite Functions consisting of
//! L-smooth _f_ and non-smooth prox-friendly _g_
//!
//! Here _g_ is always a weighted L1 norm, whose proximal operator is the
//! soft-thresholding (shrinkage) operator: the accelerated engine covers
//! any problem exposing the [`FistaProblem`] capability set, and the
//! LASSO is the concrete instantiation used for sparse coding.

mod fista;
pub use fista::*;

mod lasso;
pub use lasso::*;
