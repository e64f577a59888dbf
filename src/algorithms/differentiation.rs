//! Numerical derivatives over tangent spaces.
//!
//! Derivatives are taken along the unit tangent vectors `e_i` obtained by
//! setting one scalar component of a zero tangent to one, in
//! `for_each_component` order. This works for any nesting of tangent
//! structures (points, poses, sequences of poses, products) without knowing
//! their layout.

use ndarray::Array2;

use crate::algorithms::optimization::{GradientOracle, ObjectiveFunction};
use crate::core::error::{Error, Result};
use crate::core::traits::{Differentiable, VectorSpace};

/// Unit tangent vector with a one at component `index`
pub fn basis_vector<V: VectorSpace>(prototype: &V, index: usize) -> Result<V> {
    let dim = prototype.dimension();
    if index >= dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            got: index + 1,
        });
    }

    let mut e = prototype.zero_like();
    let mut k = 0;
    e.for_each_component_mut(&mut |c| {
        if k == index {
            *c = num_traits::one();
        }
        k += 1;
    });
    Ok(e)
}

/// All unit tangent vectors shaped like `prototype`, in component order
pub fn basis_vectors<V: VectorSpace>(prototype: &V) -> Vec<V> {
    (0..prototype.dimension())
        .filter_map(|i| basis_vector(prototype, i).ok())
        .collect()
}

fn check_step(h: f64) -> Result<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(Error::ComputationFailed(format!(
            "finite-difference step must be positive and finite, got {h}"
        )))
    }
}

fn central_difference<M, F>(objective: &F, at: &M, h: f64) -> M::TangentVector
where
    M: Differentiable<Scalar = f64>,
    F: ObjectiveFunction<M> + ?Sized,
{
    let mut grad = at.zero_tangent();
    let partials: Vec<f64> = basis_vectors(&grad)
        .iter()
        .map(|e| {
            let forward = objective.eval(&at.moved_along(&e.scaled(h)));
            let backward = objective.eval(&at.moved_along(&e.scaled(-h)));
            (forward - backward) / (2.0 * h)
        })
        .collect();

    let mut partials = partials.into_iter();
    grad.for_each_component_mut(&mut |c| {
        if let Some(p) = partials.next() {
            *c = p;
        }
    });
    grad
}

/// Gradient of `objective` at `at` by central differences with step `h`
pub fn numerical_gradient<M, F>(objective: &F, at: &M, h: f64) -> Result<M::TangentVector>
where
    M: Differentiable<Scalar = f64>,
    F: ObjectiveFunction<M> + ?Sized,
{
    check_step(h)?;
    Ok(central_difference(objective, at, h))
}

/// Jacobian of `f` at `at` by central differences with step `h`.
///
/// Rows are indexed by the scalar components of the output, columns by the
/// scalar components of the input tangent space, both in
/// `for_each_component` order. For `f: [Point2; 3] -> Point2` the result
/// is 2x6.
pub fn jacobian<M, N, F>(f: F, at: &M, h: f64) -> Result<Array2<f64>>
where
    M: Differentiable<Scalar = f64>,
    N: VectorSpace<Scalar = f64>,
    F: Fn(&M) -> N,
{
    check_step(h)?;

    let rows = f(at).dimension();
    let basis = basis_vectors(&at.zero_tangent());
    let mut j = Array2::zeros((rows, basis.len()));

    for (col, e) in basis.iter().enumerate() {
        let forward = f(&at.moved_along(&e.scaled(h)));
        let backward = f(&at.moved_along(&e.scaled(-h)));

        for got in [forward.dimension(), backward.dimension()] {
            if got != rows {
                return Err(Error::DimensionMismatch {
                    expected: rows,
                    got,
                });
            }
        }

        let column = forward.minus(&backward).scaled(1.0 / (2.0 * h));

        let mut row = 0;
        column.for_each_component(&mut |v| {
            j[[row, col]] = v;
            row += 1;
        });
    }

    Ok(j)
}

/// Gradient oracle backed by central finite differences
///
/// Costs two objective evaluations per tangent component. Useful when no
/// analytic gradient is available, and for checking hand-written ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference {
    /// Finite-difference step
    pub step: f64,
}

impl Default for CentralDifference {
    fn default() -> Self {
        Self { step: 1e-6 }
    }
}

impl CentralDifference {
    pub fn new(step: f64) -> Result<Self> {
        check_step(step)?;
        Ok(Self { step })
    }
}

impl<M> GradientOracle<M> for CentralDifference
where
    M: Differentiable<Scalar = f64>,
{
    fn gradient_at<F>(&self, p: &M, objective: &F) -> M::TangentVector
    where
        F: ObjectiveFunction<M> + ?Sized,
    {
        central_difference(objective, p, self.step)
    }
}
