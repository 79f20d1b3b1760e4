//! Constrained quadratic dictionary updates
//!
//! Both solvers minimize a quadratic in the dictionary `D` expressed
//! through its sufficient statistics `E = data·codesᵗ` and
//! `F = codes·codesᵗ`, subject to every atom (column of `D`) lying in the
//! unit L2 ball. The ADMM variant adds an incoherence penalty
//! `λ₁‖A·D‖_F²` against another subspace and reuses the block coordinate
//! descent solver for its primal step.

mod bcd;
pub use bcd::*;

mod admm;
pub use admm::*;
