//! Lasso solved by accelerated proximal gradient

use crate::error::{DictLearnError, Result};
use crate::prox::{fista, FistaProblem};
use crate::utils::{norm_1, norm_f2};
use linfa_linalg::eigh::*;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// L1-regularized least squares over a fixed dictionary,
/// ```math
/// X = \arg\min_X \tfrac12 \|Y - D X\|_F^2 + \lambda \|X\|_1
/// ```
/// solved column-batch-wise by [`fista`].
///
/// The dictionary-derived quantities `DᵗD` and the Lipschitz constant
/// `λ_max(DᵗD)` are computed once at construction; `DᵗY` is recomputed
/// whenever new data is bound with [`Lasso::fit`].
pub struct Lasso<S> {
    d: Array2<S>,
    lamb: S,
    dtd: Array2<S>,
    lipschitz: S,
    y: Option<Array2<S>>,
    dty: Option<Array2<S>>,
}

/// One `Lasso` with data bound, the concrete [`FistaProblem`].
struct BoundLasso<'a, S> {
    lasso: &'a Lasso<S>,
    y: &'a Array2<S>,
    dty: &'a Array2<S>,
}

impl<S: NdFloat> FistaProblem<S> for BoundLasso<'_, S> {
    fn lipschitz(&self) -> S {
        self.lasso.lipschitz
    }

    fn grad(&self, x: ArrayView2<S>) -> Array2<S> {
        self.lasso.dtd.dot(&x) - self.dty
    }

    fn loss(&self, x: ArrayView2<S>) -> S {
        let residual = self.y - &self.lasso.d.dot(&x);
        S::from(0.5).unwrap() * norm_f2(residual.view()) + self.lasso.lamb * norm_1(x)
    }

    fn weight(&self) -> S {
        self.lasso.lamb
    }
}

impl<S: NdFloat> Lasso<S> {
    /// Build a solver around a fixed dictionary `d` with L1 weight
    /// `lamb`, conventionally 0.1. The symmetric eigendecomposition of
    /// `DᵗD` supplies the Lipschitz constant.
    pub fn new(d: Array2<S>, lamb: S) -> Result<Self> {
        let dtd = d.t().dot(&d);
        let (eigvals, _) = dtd.eigh()?;
        let lipschitz = eigvals.fold(S::zero(), |acc, &v| acc.max(v));
        Ok(Lasso {
            d,
            lamb,
            dtd,
            lipschitz,
            y: None,
            dty: None,
        })
    }

    /// Bind observations `y` (one column per sample), precomputing `DᵗY`.
    pub fn fit(&mut self, y: ArrayView2<S>) -> Result<()> {
        if y.nrows() != self.d.nrows() {
            return Err(DictLearnError::InvalidDimensions {
                what: "Y",
                expected: (self.d.nrows(), y.ncols()),
                found: y.dim(),
            });
        }
        self.dty = Some(self.d.t().dot(&y));
        self.y = Some(y.to_owned());
        Ok(())
    }

    /// Objective value at `x` for the currently bound data.
    pub fn loss(&self, x: ArrayView2<S>) -> Result<S> {
        Ok(self.bound()?.loss(x))
    }

    /// Sparse-code `y`, starting from `xinit` (zeros when `None`).
    ///
    /// Binds `y` as with [`Lasso::fit`] and runs up to `maxiter`
    /// accelerated proximal gradient iterations, stopping early once the
    /// mean absolute change per entry drops below `tol`. The cap-exhausted
    /// return is the best iterate reached, not an error. The observer
    /// `callback` follows the same protocol as [`fista`].
    pub fn solve(
        &mut self,
        y: ArrayView2<S>,
        xinit: Option<Array2<S>>,
        maxiter: usize,
        tol: S,
        callback: impl FnMut(ArrayView2<S>, usize) -> bool,
    ) -> Result<Array2<S>> {
        self.fit(y)?;
        let shape = (self.d.ncols(), y.ncols());
        let x0 = match xinit {
            Some(x) => {
                if x.dim() != shape {
                    return Err(DictLearnError::InvalidDimensions {
                        what: "Xinit",
                        expected: shape,
                        found: x.dim(),
                    });
                }
                x
            }
            None => Array2::zeros(shape),
        };
        Ok(fista(&self.bound()?, x0.view(), maxiter, tol, callback))
    }

    fn bound(&self) -> Result<BoundLasso<'_, S>> {
        match (&self.y, &self.dty) {
            (Some(y), Some(dty)) => Ok(BoundLasso { lasso: self, y, dty }),
            _ => Err(DictLearnError::NotFitted),
        }
    }
}
