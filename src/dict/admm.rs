//! ADMM for the incoherence-penalized dictionary update

use crate::dict::dictionary_update_bcd;
use crate::error::{DictLearnError, Result};
use crate::nop;
use crate::utils::{inv_ip_xy, norm_f2};
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Knobs of the splitting scheme in [`dictionary_update_admm`].
///
/// The defaults reproduce the conventional DLSI update: penalty parameter
/// 1, 100 outer iterations, a fixed (not re-tuned) inner budget for the
/// nested block-coordinate-descent solve, and 1e-8 tolerances.
#[derive(Debug, Clone, Copy)]
pub struct AdmmSettings<S> {
    /// Penalty parameter of the augmented Lagrangian
    pub rho: S,
    /// Outer iteration cap
    pub maxiter: usize,
    /// Sweep cap of the nested dictionary update
    pub inner_maxiter: usize,
    /// Tolerance of the nested dictionary update
    pub inner_tol: S,
    /// Outer tolerance, applied to both primal and dual residuals
    pub tol: S,
}

impl<S: NdFloat> Default for AdmmSettings<S> {
    fn default() -> Self {
        AdmmSettings {
            rho: S::one(),
            maxiter: 100,
            inner_maxiter: 100,
            inner_tol: S::from(1e-8).unwrap(),
            tol: S::from(1e-8).unwrap(),
        }
    }
}

/// Dictionary update with a subspace-incoherence penalty (DLSI style).
///
/// Solves
/// ```math
/// D = \arg\min_D -2\,\mathrm{tr}(E D^T) + \mathrm{tr}(F D^T D)
///     + \lambda_1 \|A D\|_F^2
///     \quad \text{s.t.} \quad \|d_i\|_2 \leq 1
/// ```
/// by splitting `D = Z` and alternating:
/// 1. a primal update of `D` through [`dictionary_update_bcd`] on the
///    shifted statistics `E + (ρ/2)(Z - U)` and `F + (ρ/2)I`,
/// 2. a closed-form update of the consensus copy `Z`, using
///    `B1 = X(I + YX)^{-1}` with `X = (2λ₁/ρ)Aᵗ`, `Y = A` precomputed once
///    through the low-rank-update inverse,
/// 3. a dual ascent step on the scaled multiplier `U`.
///
/// Iteration stops when both residuals `‖D - Z‖_F²` and `ρ‖ΔZ‖_F²` drop
/// below `settings.tol`, or at the cap; either way the last `D` (not `Z`)
/// is returned, best-effort.
///
/// The observer `callback` sees `(d, 0)` and the primal iterate after each
/// outer iteration; returning true terminates early.
pub fn dictionary_update_admm<S>(
    d: Array2<S>,
    e: ArrayView2<S>,
    f: ArrayView2<S>,
    a: ArrayView2<S>,
    lambda1: S,
    settings: AdmmSettings<S>,
    mut callback: impl FnMut(ArrayView2<S>, usize) -> bool,
) -> Result<Array2<S>>
where
    S: NdFloat,
{
    let k = d.ncols();
    if e.dim() != d.dim() {
        return Err(DictLearnError::InvalidDimensions {
            what: "E",
            expected: d.dim(),
            found: e.dim(),
        });
    }
    if f.dim() != (k, k) {
        return Err(DictLearnError::InvalidDimensions {
            what: "F",
            expected: (k, k),
            found: f.dim(),
        });
    }
    if a.ncols() != d.nrows() {
        return Err(DictLearnError::InvalidDimensions {
            what: "A",
            expected: (a.nrows(), d.nrows()),
            found: a.dim(),
        });
    }

    let rho = settings.rho;
    let half_rho = rho * S::from(0.5).unwrap();
    let two = S::from(2.).unwrap();

    let mut d = d;
    let mut z_old = d.clone();
    let mut u = Array2::zeros(d.dim());
    let i_k = Array2::eye(k);

    // B1 = X (I + YX)^{-1} with X = (2 lambda1 / rho) Aᵗ, Y = A
    let x = a.t().to_owned() * (two * lambda1 / rho);
    let y = a;
    let b1 = x.dot(&inv_ip_xy(y, x.view())?);

    if callback(d.view(), 0) {
        return Ok(d);
    }
    for iter in 1..=settings.maxiter {
        // primal update of D
        let w = &z_old - &u;
        let e2 = &e + &(&w * half_rho);
        let f2 = &f + &(&i_k * half_rho);
        d = dictionary_update_bcd(
            d,
            e2.view(),
            f2.view(),
            settings.inner_maxiter,
            settings.inner_tol,
            nop,
        )?;

        // consensus update of Z: (2 lambda1 AᵗA + rho I)^{-1} rho V,
        // which the Woodbury factors reduce to V - B1 Y V
        let v = &d + &u;
        let z_new = &v - &b1.dot(&y.dot(&v));

        let e1 = norm_f2((&d - &z_new).view());
        let e2r = rho * norm_f2((&z_new - &z_old).view());
        if callback(d.view(), iter) {
            break;
        }
        if e1 < settings.tol && e2r < settings.tol {
            break;
        }

        // dual ascent
        u = u + &d - &z_new;
        z_old = z_new;
    }
    Ok(d)
}
