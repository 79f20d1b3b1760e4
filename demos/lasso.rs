//! Sparse-code a small random data matrix and print the result.
//!
//! Run with `cargo run --example lasso`.

use ndarray::Array2;
use ndarray_dictlearn::prox::Lasso;
use ndarray_dictlearn::utils::normc;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn main() -> ndarray_dictlearn::Result<()> {
    let (d, n, k) = (3, 7, 7);
    let mut rng = SmallRng::seed_from_u64(0);
    let dict = normc(Array2::random_using((d, k), Uniform::new(0., 1.), &mut rng));
    let y = normc(Array2::random_using((d, n), Uniform::new(0., 1.), &mut rng));

    let mut lasso = Lasso::new(dict, 0.01)?;
    lasso.fit(y.view())?;
    let x = lasso.solve(y.view(), None, 100, 1e-8, |_xi, iter| {
        println!("iter \t{}/100", iter);
        false
    })?;
    println!("loss \t {:.4}", lasso.loss(x.view())?);
    println!("{:.4}", x);
    Ok(())
}
