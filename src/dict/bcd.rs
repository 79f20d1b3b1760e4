//! Block coordinate descent for the constrained dictionary update

use crate::error::{DictLearnError, Result};
use crate::utils::norm_f2;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Online-Dictionary-Learning style dictionary update.
///
/// Solves
/// ```math
/// D = \arg\min_D -2\,\mathrm{tr}(E D^T) + \mathrm{tr}(D F D^T)
///     \quad \text{s.t.} \quad \|d_i\|_2 \leq 1
/// ```
/// where `F` is positive semidefinite, by cyclic (Gauss–Seidel) updates of
/// the columns of `D`: each column update sees the columns already updated
/// in the same sweep. A zero diagonal entry of `F` carries no gradient
/// information and leaves the corresponding atom untouched.
///
/// The iteration stops when `‖D - D_prev‖_F / numel(D)` drops below `tol`
/// or after `maxiter` sweeps; both exits return the last iterate, so a
/// cap-exhausted return is best-effort rather than an error.
///
/// Parameters
/// ----------
/// - __d:__         initial dictionary, `(d, k)`; columns need not satisfy
///                   the constraint yet
/// - __e:__         correlation matrix `data·codesᵗ`, `(d, k)`
/// - __f:__         Gram matrix `codes·codesᵗ`, `(k, k)`, PSD
/// - __maxiter:__   sweep cap, conventionally 100
/// - __tol:__       convergence tolerance, conventionally 1e-8
/// - __callback:__  observer evaluated at `(d, 0)` and after each sweep;
///                   returning true terminates early
pub fn dictionary_update_bcd<S>(
    mut d: Array2<S>,
    e: ArrayView2<S>,
    f: ArrayView2<S>,
    maxiter: usize,
    tol: S,
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

    let sized = S::from(d.len()).unwrap();
    let mut d_old = d.clone();

    if callback(d.view(), 0) {
        return Ok(d);
    }
    for iter in 1..=maxiter {
        for i in 0..k {
            let fii = f[(i, i)];
            if fii == S::zero() {
                continue;
            }
            let mut a = (&e.column(i) - &d.dot(&f.column(i))) / fii + &d.column(i);
            let norm = a.dot(&a).sqrt();
            // project onto the unit ball: a / max(‖a‖₂, 1)
            if norm > S::one() {
                a /= norm;
            }
            d.column_mut(i).assign(&a);
        }

        if callback(d.view(), iter) {
            break;
        }
        if norm_f2((&d - &d_old).view()).sqrt() / sized < tol {
            break;
        }
        d_old.assign(&d);
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nop;
    use crate::utils::normc;
    use approx::assert_abs_diff_eq;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn random_problem(
        d_dim: usize,
        k: usize,
        n: usize,
        seed: u64,
    ) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let d0 = normc(Array2::random_using((d_dim, k), Uniform::new(0., 1.), &mut rng));
        let y = Array2::random_using((d_dim, n), Uniform::new(0., 1.), &mut rng);
        let x = Array2::random_using((k, n), Uniform::new(0., 1.), &mut rng);
        let e = y.dot(&x.t());
        let f = x.dot(&x.t());
        (d0, e, f)
    }

    fn objective(d: &ArrayView2<f64>, e: &Array2<f64>, f: &Array2<f64>) -> f64 {
        // -2 tr(E Dᵗ) + tr(D F Dᵗ)
        -2.0 * (e * d).sum() + (&d.dot(f) * d).sum()
    }

    #[test]
    fn columns_stay_in_unit_ball() {
        let (d0, e, f) = random_problem(4, 6, 10, 7);
        let d = dictionary_update_bcd(d0, e.view(), f.view(), 100, 1e-8, nop).unwrap();
        for col in d.columns() {
            assert!(col.dot(&col).sqrt() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn objective_non_increasing_across_sweeps() {
        let (d0, e, f) = random_problem(5, 8, 12, 13);
        let mut prev = f64::INFINITY;
        dictionary_update_bcd(d0, e.view(), f.view(), 50, 1e-12, |d, _iter| {
            let cost = objective(&d, &e, &f);
            assert!(cost <= prev + 1e-9);
            prev = cost;
            false
        })
        .unwrap();
    }

    #[test]
    fn zero_gram_diagonal_leaves_atom_unchanged() {
        let (d0, e, mut f) = random_problem(4, 5, 9, 21);
        f.row_mut(2).fill(0.0);
        f.column_mut(2).fill(0.0);
        let frozen = d0.column(2).to_owned();
        let d = dictionary_update_bcd(d0, e.view(), f.view(), 100, 1e-8, nop).unwrap();
        assert_eq!(d.column(2), frozen);
    }

    #[test]
    fn idempotent_near_fixed_point() {
        let (d0, e, f) = random_problem(4, 6, 10, 3);
        let sized = (d0.len()) as f64;
        let d = dictionary_update_bcd(d0, e.view(), f.view(), 200, 1e-10, nop).unwrap();
        let d_again =
            dictionary_update_bcd(d.clone(), e.view(), f.view(), 1, 1e-10, nop).unwrap();
        let moved = crate::utils::norm_f2((&d_again - &d).view()).sqrt() / sized;
        assert!(moved < 1e-8);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let d0 = Array2::<f64>::zeros((4, 6));
        let e = Array2::<f64>::zeros((4, 5));
        let f = Array2::<f64>::zeros((6, 6));
        assert!(dictionary_update_bcd(d0, e.view(), f.view(), 10, 1e-8, nop).is_err());
    }

    #[test]
    fn callback_terminates_early() {
        let (d0, e, f) = random_problem(4, 6, 10, 5);
        let mut sweeps = 0;
        dictionary_update_bcd(d0, e.view(), f.view(), 100, 1e-12, |_d, iter| {
            sweeps = iter;
            iter >= 3
        })
        .unwrap();
        assert_eq!(sweeps, 3);
    }

    #[test]
    fn interior_solution_not_projected() {
        // with E tiny the unconstrained minimizer lies inside the ball
        let f = Array2::eye(2);
        let e = array![[0.1, 0.0], [0.0, 0.1]];
        let d0 = Array2::zeros((2, 2));
        let d = dictionary_update_bcd(d0, e.view(), f.view(), 100, 1e-12, nop).unwrap();
        assert_abs_diff_eq!(d, e, epsilon = 1e-8);
    }
}
