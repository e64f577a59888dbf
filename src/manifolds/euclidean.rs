use ndarray::{Array1, Zip};
use num_traits::Float;

use crate::core::{Differentiable, VectorSpace};

/// Plain scalars are one-dimensional Euclidean spaces and their own tangent
/// space (e.g. the rotation angle inside a pose tangent).
macro_rules! impl_scalar_space {
    ($($t:ty),*) => {$(
        impl VectorSpace for $t {
            type Scalar = $t;

            fn zero_like(&self) -> Self {
                0.0
            }

            fn plus(&self, other: &Self) -> Self {
                self + other
            }

            fn scaled(&self, alpha: $t) -> Self {
                alpha * self
            }

            fn for_each_component(&self, f: &mut dyn FnMut($t)) {
                f(*self)
            }

            fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut $t)) {
                f(self)
            }

            fn zip_components(&self, other: &Self, f: &mut dyn FnMut($t, $t)) {
                f(*self, *other)
            }

            fn dimension(&self) -> usize {
                1
            }
        }

        impl Differentiable for $t {
            type Scalar = $t;
            type TangentVector = $t;

            fn move_along(&mut self, direction: &Self::TangentVector) {
                *self += direction;
            }

            fn zero_tangent(&self) -> Self::TangentVector {
                0.0
            }
        }
    )*};
}

impl_scalar_space!(f32, f64);

/// Euclidean space R^n as `Array1`, with the standard metric.
///
/// Points and tangent vectors share the representation; moving along a
/// vector is plain addition.
impl<T: Float> VectorSpace for Array1<T> {
    type Scalar = T;

    fn zero_like(&self) -> Self {
        Array1::from_elem(self.len(), T::zero())
    }

    fn plus(&self, other: &Self) -> Self {
        Zip::from(self).and(other).map_collect(|&a, &b| a + b)
    }

    fn scaled(&self, alpha: T) -> Self {
        self.mapv(|a| alpha * a)
    }

    fn for_each_component(&self, f: &mut dyn FnMut(T)) {
        self.iter().for_each(|&a| f(a));
    }

    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut T)) {
        self.iter_mut().for_each(f);
    }

    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(T, T)) {
        self.iter().zip(other.iter()).for_each(|(&a, &b)| f(a, b));
    }

    fn dimension(&self) -> usize {
        self.len()
    }
}

impl<T: Float> Differentiable for Array1<T> {
    type Scalar = T;
    type TangentVector = Array1<T>;

    /// Exponential map: simple addition in Euclidean space
    fn move_along(&mut self, direction: &Self::TangentVector) {
        Zip::from(self).and(direction).for_each(|a, &d| *a = *a + d);
    }

    fn zero_tangent(&self) -> Self::TangentVector {
        self.zero_like()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{dot, norm_squared};
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_euclidean_move_along() {
        let mut p = arr1(&[1.0, 2.0, 3.0]);
        let x = arr1(&[0.1, 0.2, 0.3]);

        p.move_along(&x.scaled(10.0));

        assert_relative_eq!(p[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(p[1], 4.0, epsilon = 1e-10);
        assert_relative_eq!(p[2], 6.0, epsilon = 1e-10);
    }

    #[test]
    fn test_euclidean_dot() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = arr1(&[4.0, -5.0, 6.0]);

        assert_relative_eq!(dot(&a, &b), 12.0, epsilon = 1e-12);
        assert_relative_eq!(norm_squared(&a), 14.0, epsilon = 1e-12);
        assert_eq!(a.dimension(), 3);
    }

    #[test]
    fn test_euclidean_zero_and_plus() {
        let a = arr1(&[1.0, -1.0]);
        let z = a.zero_tangent();

        assert_eq!(z, arr1(&[0.0, 0.0]));
        assert_eq!(a.plus(&z), a);
        assert_eq!(a.minus(&a), z);
    }

    #[test]
    fn test_euclidean_mut_visitor() {
        let mut v = arr1(&[1.0, 2.0, 3.0]);
        v.for_each_component_mut(&mut |c| *c *= 2.0);
        assert_eq!(v, arr1(&[2.0, 4.0, 6.0]));
    }

    #[test]
    fn test_scalar_space() {
        let mut theta = 0.5_f64;
        theta.move_along(&0.25);

        assert_relative_eq!(theta, 0.75);
        assert_relative_eq!(dot(&2.0_f64, &3.0_f64), 6.0);
        assert_eq!(theta.zero_tangent(), 0.0);
    }
}
