//! Step-size strategies along a fixed search direction.
//!
//! A strategy receives `phi(a) = f(x + a * s)` and returns the step size it
//! picks, or `None` when every trial it evaluated was non-finite. Trials are
//! independent reads of the current iterate, which is why `phi` is `Sync`:
//! strategies are free to evaluate it from several threads.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::core::error::{Error, Result};

/// Strategy for choosing a step size along a search direction
pub trait LineSearch {
    /// Pick a step size for `phi`, the objective restricted to the direction.
    fn search(&self, phi: &(dyn Fn(f64) -> f64 + Sync)) -> Option<f64>;

    /// Check the strategy's parameters before an optimization run.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Exhaustive search over the uniform grid `a = resolution * i` for
/// `i in lower..upper`.
///
/// The default grid runs from `-1.0` to `0.99` in increments of `0.01` (200
/// samples). There is no refinement: minima finer than `resolution`, or
/// outside the grid, are not found. Ties go to the smallest `a`. Because
/// the grid contains `a = 0` whenever `lower <= 0 < upper`, the picked step
/// never increases the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSearch {
    /// First grid index (inclusive)
    pub lower: i64,
    /// Last grid index (exclusive)
    pub upper: i64,
    /// Spacing between grid samples
    pub resolution: f64,
}

impl Default for GridSearch {
    fn default() -> Self {
        Self {
            lower: -100,
            upper: 100,
            resolution: 0.01,
        }
    }
}

impl GridSearch {
    pub fn new(lower: i64, upper: i64, resolution: f64) -> Self {
        Self {
            lower,
            upper,
            resolution,
        }
    }

    /// Number of grid samples
    pub fn len(&self) -> usize {
        self.upper.saturating_sub(self.lower).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sample(&self, phi: &(dyn Fn(f64) -> f64 + Sync), i: i64) -> Option<(i64, f64)> {
        let value = phi(self.resolution * i as f64);
        value.is_finite().then_some((i, value))
    }
}

/// Lower objective wins, then lower grid index.
fn better(a: (i64, f64), b: (i64, f64)) -> (i64, f64) {
    if b.1 < a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}

impl LineSearch for GridSearch {
    fn search(&self, phi: &(dyn Fn(f64) -> f64 + Sync)) -> Option<f64> {
        // Compute samples (parallel if feature enabled, sequential otherwise)
        #[cfg(feature = "parallel")]
        let best = (self.lower..self.upper)
            .into_par_iter()
            .filter_map(|i| self.sample(phi, i))
            .reduce_with(better);

        #[cfg(not(feature = "parallel"))]
        let best = (self.lower..self.upper)
            .filter_map(|i| self.sample(phi, i))
            .reduce(better);

        let (i, value) = best?;
        let alpha = self.resolution * i as f64;
        trace!("grid search picked a = {:.4} (phi = {:.6e})", alpha, value);
        Some(alpha)
    }

    fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "grid resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        if self.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "empty grid: lower {} >= upper {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Always take the same step, provided the objective is finite there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep(pub f64);

impl LineSearch for FixedStep {
    fn search(&self, phi: &(dyn Fn(f64) -> f64 + Sync)) -> Option<f64> {
        phi(self.0).is_finite().then_some(self.0)
    }

    fn validate(&self) -> Result<()> {
        if !self.0.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "fixed step must be finite, got {}",
                self.0
            )));
        }
        Ok(())
    }
}
