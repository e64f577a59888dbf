use num_traits::{Float, One, Zero};

/// Vector space of tangent vectors (displacements) attached to a model.
///
/// Besides the usual zero/add/scale operations, implementors expose their
/// scalar leaves through visitors. Composite types delegate to their
/// sub-components in a fixed order, so the visitors reach every scalar of an
/// arbitrarily nested structure. Inner products, norms and finite-difference
/// bases are all built on top of these visitors.
pub trait VectorSpace: Clone {
    /// Scalar field (f64 or f32)
    type Scalar: Float;

    /// Zero vector with the same shape as `self`
    fn zero_like(&self) -> Self;

    /// Vector sum `self + other`
    fn plus(&self, other: &Self) -> Self;

    /// Scalar multiple `alpha * self`
    fn scaled(&self, alpha: Self::Scalar) -> Self;

    /// Visit every scalar component in order.
    fn for_each_component(&self, f: &mut dyn FnMut(Self::Scalar));

    /// Visit every scalar component mutably, in the same order as
    /// `for_each_component`.
    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut Self::Scalar));

    /// Visit matching components of `self` and `other` pairwise.
    ///
    /// Both vectors are assumed to share a shape; for variable-length types
    /// the shorter one bounds the visit.
    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(Self::Scalar, Self::Scalar));

    /// Number of scalar components
    fn dimension(&self) -> usize {
        let mut n = 0;
        self.for_each_component(&mut |_| n += 1);
        n
    }

    /// Vector difference `self - other`
    fn minus(&self, other: &Self) -> Self {
        self.plus(&other.scaled(-Self::Scalar::one()))
    }

    /// Scalar components flattened in visiting order
    fn to_components(&self) -> Vec<Self::Scalar> {
        let mut out = Vec::with_capacity(self.dimension());
        self.for_each_component(&mut |c| out.push(c));
        out
    }
}

/// A value that can be moved along its tangent vectors.
///
/// This is the only capability an optimizer needs from a model: gradients
/// live in `TangentVector`, and an iterate is updated by moving it along a
/// (scaled) search direction.
pub trait Differentiable: Clone {
    /// Scalar field of the tangent space
    type Scalar: Float;

    /// Tangent vector type
    type TangentVector: VectorSpace<Scalar = Self::Scalar>;

    /// Move `self` in place along `direction`.
    fn move_along(&mut self, direction: &Self::TangentVector);

    /// Zero tangent vector at `self`
    fn zero_tangent(&self) -> Self::TangentVector;

    /// Copy of `self` moved along `direction`
    fn moved_along(&self, direction: &Self::TangentVector) -> Self {
        let mut out = self.clone();
        out.move_along(direction);
        out
    }
}

/// Inner product: sum of element-wise products over all scalar leaves.
pub fn dot<V: VectorSpace>(a: &V, b: &V) -> V::Scalar {
    let mut acc = V::Scalar::zero();
    a.zip_components(b, &mut |x, y| acc = acc + x * y);
    acc
}

/// Squared Euclidean norm `dot(v, v)`
pub fn norm_squared<V: VectorSpace>(v: &V) -> V::Scalar {
    dot(v, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifolds::{Point2, Pose2, Pose2Tangent};
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_three_leaves() {
        let a = Pose2Tangent::new(Point2::new(1.0, 2.0), 3.0);
        let b = Pose2Tangent::new(Point2::new(-4.0, 0.5), 2.0);

        // 1*(-4) + 2*0.5 + 3*2
        assert_relative_eq!(dot(&a, &b), 3.0, epsilon = 1e-12);
        assert_eq!(a.dimension(), 3);
    }

    #[test]
    fn test_default_minus_and_components() {
        let a = Point2::new(5.0, 1.0);
        let b = Point2::new(2.0, 3.0);
        assert_eq!(a.minus(&b), Point2::new(3.0, -2.0));
        assert_eq!(a.to_components(), vec![5.0, 1.0]);
        assert_relative_eq!(norm_squared(&a), 26.0);
    }

    #[test]
    fn test_moved_along_leaves_original() {
        let pose = Pose2::new(1.0, 2.0, 0.5);
        let moved = pose.moved_along(&Pose2Tangent::new(Point2::new(1.0, 1.0), 0.25));

        assert_eq!(pose, Pose2::new(1.0, 2.0, 0.5));
        assert_eq!(moved, Pose2::new(2.0, 3.0, 0.75));
    }
}
