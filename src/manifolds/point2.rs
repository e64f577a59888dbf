use std::ops::{Add, Mul, Neg, Sub};

use crate::core::{Differentiable, VectorSpace};

/// Point in the plane. The plane is flat, so `Point2` is its own tangent
/// vector type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point2 {
    type Output = Point2;

    fn neg(self) -> Point2 {
        Point2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl VectorSpace for Point2 {
    type Scalar = f64;

    fn zero_like(&self) -> Self {
        Point2::default()
    }

    fn plus(&self, other: &Self) -> Self {
        *self + *other
    }

    fn scaled(&self, alpha: f64) -> Self {
        *self * alpha
    }

    fn for_each_component(&self, f: &mut dyn FnMut(f64)) {
        f(self.x);
        f(self.y);
    }

    fn for_each_component_mut(&mut self, f: &mut dyn FnMut(&mut f64)) {
        f(&mut self.x);
        f(&mut self.y);
    }

    fn zip_components(&self, other: &Self, f: &mut dyn FnMut(f64, f64)) {
        f(self.x, other.x);
        f(self.y, other.y);
    }

    fn dimension(&self) -> usize {
        2
    }
}

impl Differentiable for Point2 {
    type Scalar = f64;
    type TangentVector = Point2;

    fn move_along(&mut self, direction: &Point2) {
        self.x += direction.x;
        self.y += direction.y;
    }

    fn zero_tangent(&self) -> Point2 {
        Point2::default()
    }
}
