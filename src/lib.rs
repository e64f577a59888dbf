//! Differentiable model types and a nonlinear conjugate gradient optimizer.
//!
//! Models implement [`Differentiable`] (a point that can be moved along a
//! tangent vector) and their tangents implement [`VectorSpace`]. The
//! [`NLCG`] optimizer minimizes any scalar objective over such a model given
//! a gradient oracle, which can be an analytic closure or the numerical
//! [`CentralDifference`] backend.
//!
//! ```
//! use manifolds::prelude::*;
//!
//! let target = Point2::new(3.0, -1.0);
//! let objective = move |p: &Point2| norm_squared(&(*p - target));
//! let gradient = move |p: &Point2| (*p - target) * 2.0;
//!
//! let mut nlcg = NLCG::new();
//! let result = nlcg.optimize(&objective, &gradient, Point2::new(0.0, 0.0)).unwrap();
//! assert!(result.converged);
//! assert!((result.point.x - 3.0).abs() < 1e-4);
//! ```

pub mod algorithms;
pub mod core;
#[cfg(feature = "logging")]
pub mod logger;
pub mod manifolds;

// Flat re-exports for convenience
pub use core::{dot, norm_squared, Differentiable, Error, Product, Result, VectorSpace};

// Re-export model types
pub use manifolds::{Point2, Pose2, Pose2Tangent};

// Re-export optimization types
pub use algorithms::{
    jacobian, numerical_gradient, CentralDifference, FixedStep, GradientOracle, GridSearch,
    IterationRecord, LineSearch, ObjectiveFunction, OptimizationResult, Termination, NLCG,
};

#[cfg(feature = "logging")]
pub use logger::{init_logger, init_logger_with_level};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::algorithms::{
        CentralDifference, GradientOracle, GridSearch, LineSearch, ObjectiveFunction,
        OptimizationResult, Termination, NLCG,
    };
    pub use crate::core::{dot, norm_squared, Differentiable, Error, Result, VectorSpace};
    pub use crate::manifolds::{Point2, Pose2, Pose2Tangent};
}
