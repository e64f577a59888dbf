use crate::core::{Differentiable, VectorSpace};

/// Product of two differentiable values A × B
///
/// Used to combine different parameter blocks, e.g. a pose together with a
/// scale, or a landmark together with a camera. Both halves must share a
/// scalar field. Products nest, so `Product<Product<A, B>, C>` is a valid
/// three-block model, and every visitor walks the first half before the
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Product<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Product<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Product { first, second }
    }
}

impl<A, B> VectorSpace for Product<A, B>
where
    A: VectorSpace,
    B: VectorSpace<Scalar = A::Scalar>,
{
    type Scalar = A::Scalar;

    fn zero_like(&self) -> Self {
        Product::new(self.first.zero_like(), self.second.zero_like())
    }

    fn plus(&self, other: &Self) -> Self {
        Product::new(
            self.first.plus(&other.first),
            self.second.plus(&other.second),
        )
    }

    fn scaled(&self, alpha: A::Scalar) -> Self {
        Product::new(self.first.scaled(alpha), self.second.scaled(alpha))
    }

    fn for_each_component(&self, f: &mut dyn FnMut(A::Scalar)) {
        self.first.for_each_component(f);
        self.second.for_each_component(f);
    }

    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut A::Scalar)) {
        self.first.for_each_component_mut(f);
        self.second.for_each_component_mut(f);
    }

    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(A::Scalar, A::Scalar)) {
        self.first.zip_components(&other.first, f);
        self.second.zip_components(&other.second, f);
    }
}

impl<A, B> Differentiable for Product<A, B>
where
    A: Differentiable,
    B: Differentiable<Scalar = A::Scalar>,
{
    type Scalar = A::Scalar;
    type TangentVector = Product<A::TangentVector, B::TangentVector>;

    fn move_along(&mut self, direction: &Self::TangentVector) {
        // Each factor moves independently
        self.first.move_along(&direction.first);
        self.second.move_along(&direction.second);
    }

    fn zero_tangent(&self) -> Self::TangentVector {
        Product::new(self.first.zero_tangent(), self.second.zero_tangent())
    }
}
