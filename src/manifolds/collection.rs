use crate::core::{Differentiable, VectorSpace};

/// A sequence of tangent vectors is itself a vector space, with operations
/// applied element by element. Sequences are expected to have equal lengths;
/// `plus` and `zip_components` stop at the shorter one.
impl<V: VectorSpace> VectorSpace for Vec<V> {
    type Scalar = V::Scalar;

    fn zero_like(&self) -> Self {
        self.iter().map(VectorSpace::zero_like).collect()
    }

    fn plus(&self, other: &Self) -> Self {
        self.iter().zip(other).map(|(a, b)| a.plus(b)).collect()
    }

    fn scaled(&self, alpha: V::Scalar) -> Self {
        self.iter().map(|v| v.scaled(alpha)).collect()
    }

    fn for_each_component(&self, f: &mut dyn FnMut(V::Scalar)) {
        for v in self {
            v.for_each_component(f);
        }
    }

    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut V::Scalar)) {
        for v in self.iter_mut() {
            v.for_each_component_mut(f);
        }
    }

    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(V::Scalar, V::Scalar)) {
        for (a, b) in self.iter().zip(other) {
            a.zip_components(b, f);
        }
    }

    fn dimension(&self) -> usize {
        self.iter().map(VectorSpace::dimension).sum()
    }
}

/// A sequence of models (e.g. the poses of a trajectory) moves element-wise
/// along a sequence of tangent vectors.
impl<M: Differentiable> Differentiable for Vec<M> {
    type Scalar = M::Scalar;
    type TangentVector = Vec<M::TangentVector>;

    fn move_along(&mut self, direction: &Self::TangentVector) {
        for (m, d) in self.iter_mut().zip(direction) {
            m.move_along(d);
        }
    }

    fn zero_tangent(&self) -> Self::TangentVector {
        self.iter().map(Differentiable::zero_tangent).collect()
    }
}
