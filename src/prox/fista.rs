//! Fast Iterative Shrinking/Thresholding Algorithm

use crate::utils::{norm_1, shrinkage};
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Capability interface of a problem solvable by [`fista`]: an L-smooth
/// data-fit term plus a weighted L1 penalty.
pub trait FistaProblem<S: NdFloat> {
    /// Lipschitz constant of the smooth part's gradient; its inverse is
    /// the step size.
    fn lipschitz(&self) -> S;
    /// Gradient of the smooth part at `x`.
    fn grad(&self, x: ArrayView2<S>) -> Array2<S>;
    /// Full objective at `x`. Diagnostic only, never drives the
    /// iteration.
    fn loss(&self, x: ArrayView2<S>) -> S;
    /// Weight of the L1 penalty.
    fn weight(&self) -> S;
}

/// Accelerated proximal gradient iteration for composite L1 problems.
///
/// Alternates a proximal gradient step with Nesterov momentum:
/// ```math
/// \begin{aligned}
/// x_{i+1} &= \mathrm{shrinkage}(y_i - \tfrac{1}{L}\nabla f(y_i), \tfrac{\lambda}{L}) \\
/// t_{i+1} &= \tfrac12 (1 + \sqrt{1 + 4 t_i^2}) \\
/// y_{i+1} &= x_{i+1} + \tfrac{t_i - 1}{t_{i+1}} (x_{i+1} - x_i)
/// \end{aligned}
/// ```
/// and stops when `‖x_{i+1} - x_i‖₁ / numel` drops below `tol` or at the
/// cap, returning the last iterate either way. The momentum makes the
/// loss sequence non-monotone iteration-to-iteration even though the
/// scheme converges overall; observers should expect that.
///
/// Parameters
/// ----------
/// - __problem:__   anything implementing [`FistaProblem`]
/// - __x0:__        initial iterate
/// - __maxiter:__   iteration cap, conventionally 100
/// - __tol:__       convergence tolerance, conventionally 1e-8
/// - __callback:__  observer evaluated at `(x0, 0)` and after each
///                   iteration; returning true terminates early
pub fn fista<S>(
    problem: &impl FistaProblem<S>,
    x0: ArrayView2<S>,
    maxiter: usize,
    tol: S,
    mut callback: impl FnMut(ArrayView2<S>, usize) -> bool,
) -> Array2<S>
where
    S: NdFloat,
{
    let linv = S::one() / problem.lipschitz();
    let thresh = problem.weight() * linv;
    let half = S::from(0.5).unwrap();
    let four = S::from(4.).unwrap();
    let sizex = S::from(x0.len()).unwrap();

    let mut x = x0.to_owned();
    let mut y = x0.to_owned();
    let mut t = S::one();

    if callback(x.view(), 0) {
        return x;
    }
    for iter in 1..=maxiter {
        let grad = problem.grad(y.view());
        let x_next = shrinkage((&y - &(grad * linv)).view(), thresh);
        let t_next = half * (S::one() + (S::one() + four * t * t).sqrt());
        y = &x_next + &((&x_next - &x) * ((t - S::one()) / t_next));

        let e = norm_1((&x_next - &x).view()) / sizex;
        let stop = callback(x_next.view(), iter);
        x = x_next;
        t = t_next;
        if stop || e < tol {
            break;
        }
    }
    x
}
