//! Shared numeric building blocks for the dictionary and sparse-coding
//! solvers: norms, column normalization, soft-thresholding, and a
//! Woodbury-identity matrix inverse.

use crate::error::{DictLearnError, Result};
use linfa_linalg::cholesky::*;
use linfa_linalg::triangular::*;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Frobenius norm squared, i.e. the sum of squared entries.
pub fn norm_f2<S, D>(m: ArrayView<S, D>) -> S
where
    S: NdFloat,
    D: Dimension,
{
    m.fold(S::zero(), |acc, &v| acc + v * v)
}

/// Entrywise L1 norm, the sum of absolute values.
pub fn norm_1<S, D>(m: ArrayView<S, D>) -> S
where
    S: NdFloat,
    D: Dimension,
{
    m.fold(S::zero(), |acc, &v| acc + v.abs())
}

/// Number of entries of an array.
pub fn numel<S, D>(m: ArrayView<S, D>) -> usize
where
    D: Dimension,
{
    m.len()
}

/// Normalize each column to unit L2 norm. Zero columns are left unchanged.
pub fn normc<S>(mut m: Array2<S>) -> Array2<S>
where
    S: NdFloat,
{
    for mut col in m.columns_mut() {
        let norm = col.dot(&col).sqrt();
        if norm > S::zero() {
            col.mapv_inplace(|v| v / norm);
        }
    }
    m
}

/// Soft-thresholding, the proximal operator of the L1 norm.
///
/// Shrinks each entry toward zero by `threshold`, zeroing entries with
/// magnitude below it:
/// ```math
/// \mathrm{shrinkage}(v, t) = \mathrm{sign}(v)\max(|v| - t, 0)
/// ```
pub fn shrinkage<S, D>(m: ArrayView<S, D>, threshold: S) -> Array<S, D>
where
    S: NdFloat,
    D: Dimension,
{
    m.mapv(|v| v.signum() * (v.abs() - threshold).max(S::zero()))
}

/// Inverse of `I + X·Y` exploiting rank structure.
///
/// When `X` is tall (more rows than columns) the inverse is formed through
/// the Woodbury identity
/// ```math
/// (I + XY)^{-1} = I - X(I + YX)^{-1}Y
/// ```
/// so that only the smaller `I + YX` is ever inverted directly. `X·Y` must
/// be symmetric positive semidefinite (it always is at this crate's call
/// sites, where `Y = A` and `X` is a non-negative multiple of `Aᵗ`).
pub fn inv_ip_xy<S>(x: ArrayView2<S>, y: ArrayView2<S>) -> Result<Array2<S>>
where
    S: NdFloat,
{
    let (d1, d2) = x.dim();
    if y.dim() != (d2, d1) {
        return Err(DictLearnError::InvalidDimensions {
            what: "Y",
            expected: (d2, d1),
            found: y.dim(),
        });
    }
    if d1 > d2 {
        let small = spd_inverse(Array2::eye(d2) + y.dot(&x))?;
        Ok(Array2::eye(d1) - x.dot(&small).dot(&y))
    } else {
        spd_inverse(Array2::eye(d1) + x.dot(&y))
    }
}

/// Inverse of a symmetric positive definite matrix via its Cholesky
/// factor and two triangular solves against the identity.
fn spd_inverse<S>(c: Array2<S>) -> Result<Array2<S>>
where
    S: NdFloat,
{
    let n = c.nrows();
    let l = c.cholesky()?;
    let mut inv = Array2::eye(n);
    l.solve_triangular_inplace(&mut inv, UPLO::Lower)?;
    l.t().solve_triangular_inplace(&mut inv, UPLO::Upper)?;
    Ok(inv)
}
