use crate::core::{Differentiable, VectorSpace};
use crate::manifolds::point2::Point2;

/// Rigid pose in the plane: a translation and a heading angle (radians).
///
/// Updates are applied per component: the translation moves along the
/// translational part of the tangent and the heading is incremented by the
/// rotational part. No group composition is performed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose2 {
    pub t: Point2,
    pub rot: f64,
}

impl Pose2 {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose2 {
            t: Point2::new(x, y),
            rot: theta,
        }
    }
}

/// Tangent vector of `Pose2`: a nested translation tangent plus a rotation
/// scalar, three scalar leaves in total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose2Tangent {
    pub t: Point2,
    pub rot: f64,
}

impl Pose2Tangent {
    pub fn new(t: Point2, rot: f64) -> Self {
        Pose2Tangent { t, rot }
    }
}

impl VectorSpace for Pose2Tangent {
    type Scalar = f64;

    fn zero_like(&self) -> Self {
        Pose2Tangent::default()
    }

    fn plus(&self, other: &Self) -> Self {
        Pose2Tangent::new(self.t.plus(&other.t), self.rot + other.rot)
    }

    fn scaled(&self, alpha: f64) -> Self {
        Pose2Tangent::new(self.t.scaled(alpha), alpha * self.rot)
    }

    fn for_each_component(&self, f: &mut dyn FnMut(f64)) {
        self.t.for_each_component(f);
        f(self.rot);
    }

    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut f64)) {
        self.t.for_each_component_mut(f);
        f(&mut self.rot);
    }

    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(f64, f64)) {
        self.t.zip_components(&other.t, f);
        f(self.rot, other.rot);
    }

    fn dimension(&self) -> usize {
        3
    }
}

impl Differentiable for Pose2 {
    type Scalar = f64;
    type TangentVector = Pose2Tangent;

    fn move_along(&mut self, direction: &Pose2Tangent) {
        self.t.move_along(&direction.t);
        self.rot += direction.rot;
    }

    fn zero_tangent(&self) -> Pose2Tangent {
        Pose2Tangent::default()
    }
}
