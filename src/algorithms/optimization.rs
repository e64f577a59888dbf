use std::fmt;

use tracing::{debug, warn};

use crate::algorithms::line_search::{GridSearch, LineSearch};
use crate::core::error::{Error, Result};
use crate::core::traits::{dot, Differentiable, VectorSpace};

/// Scalar objective on a differentiable model
///
/// Any `Fn(&M) -> f64` closure is an objective. Objectives are evaluated
/// many times per iteration and are expected to be free of side effects.
pub trait ObjectiveFunction<M> {
    /// Evaluate the function at point p
    fn eval(&self, p: &M) -> f64;
}

impl<M, F> ObjectiveFunction<M> for F
where
    F: Fn(&M) -> f64,
{
    fn eval(&self, p: &M) -> f64 {
        self(p)
    }
}

/// Source of gradients for an objective
///
/// The optimizer performs no gradient verification, so the oracle must be
/// exact or at least a consistent descent direction. Any
/// `Fn(&M) -> M::TangentVector` closure is an oracle that ignores the
/// objective it is handed (a hand-coded gradient); numerical backends use
/// the objective instead (see `CentralDifference`).
pub trait GradientOracle<M: Differentiable> {
    /// Gradient of `objective` at `p`, as a tangent vector at `p`
    fn gradient_at<F>(&self, p: &M, objective: &F) -> M::TangentVector
    where
        F: ObjectiveFunction<M> + ?Sized;
}

impl<M, G> GradientOracle<M> for G
where
    M: Differentiable,
    G: Fn(&M) -> M::TangentVector,
{
    fn gradient_at<F>(&self, p: &M, _objective: &F) -> M::TangentVector
    where
        F: ObjectiveFunction<M> + ?Sized,
    {
        self(p)
    }
}

/// Reason an optimization run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Squared norm of the applied step fell below `precision`
    Converged,
    /// `max_iteration` steps were taken without converging
    MaxIterationsReached,
    /// The line search found no finite objective value along the direction
    NonFiniteObjective,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "Step norm below precision"),
            Termination::MaxIterationsReached => write!(f, "Maximum iterations reached"),
            Termination::NonFiniteObjective => {
                write!(f, "Objective is not finite along the search direction")
            }
        }
    }
}

/// Per-iteration diagnostics, collected when tracing is enabled on the
/// optimizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    /// Step counter value at which the record was taken
    pub iteration: usize,
    /// Objective value at the accepted iterate
    pub value: f64,
    /// Fletcher-Reeves coefficient used for the search direction
    pub beta: f64,
    /// Step size picked by the line search
    pub alpha: f64,
    /// Squared norm of the applied displacement `alpha * s`
    pub step_norm_squared: f64,
}

/// Optimization result
#[derive(Debug, Clone)]
pub struct OptimizationResult<P> {
    /// Final point
    pub point: P,
    /// Final objective value
    pub value: f64,
    /// Number of steps taken
    pub iterations: usize,
    /// Convergence status
    pub converged: bool,
    /// Reason for termination
    pub termination: Termination,
    /// Per-iteration records, if requested with `NLCG::with_trace`
    pub trace: Option<Vec<IterationRecord>>,
}

/// Fletcher-Reeves coefficient `|dx|^2 / |dx_prev|^2`.
///
/// Returns 0 (a steepest-descent restart) when the previous gradient has
/// zero norm or the ratio is otherwise not finite.
pub fn fletcher_reeves_beta<V>(dx: &V, dx_prev: &V) -> f64
where
    V: VectorSpace<Scalar = f64>,
{
    let denominator = dot(dx_prev, dx_prev);
    if denominator == 0.0 {
        return 0.0;
    }
    let beta = dot(dx, dx) / denominator;
    if beta.is_finite() {
        beta
    } else {
        0.0
    }
}

/// Nonlinear conjugate gradient optimizer (Fletcher-Reeves)
///
/// Generic over every `Differentiable` model with an `f64` scalar field;
/// loosely follows Nocedal & Wright, *Numerical Optimization*, ch. 5.2.
///
/// The search direction follows `s_n = dx_n + beta_n * s_{n-1}`, and each
/// step size comes from the configured line search (`GridSearch` by
/// default). The very first move is a fixed step of `initial_step` along
/// the initial gradient, without a line search.
#[derive(Debug, Clone)]
pub struct NLCG<L = GridSearch> {
    /// Convergence threshold on the squared norm of the applied step
    pub precision: f64,
    /// Hard cap on the number of steps
    pub max_iteration: usize,
    /// Scale of the bootstrap move along the initial gradient
    pub initial_step: f64,
    /// Step-size strategy
    pub line_search: L,
    /// If true, stores per-iteration records into the result
    pub collect_trace: bool,
    step: usize,
}

impl Default for NLCG<GridSearch> {
    fn default() -> Self {
        Self {
            precision: 1e-10,
            max_iteration: 400,
            initial_step: 1.0,
            line_search: GridSearch::default(),
            collect_trace: false,
            step: 0,
        }
    }
}

impl NLCG<GridSearch> {
    /// Create a new optimizer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an optimizer for the same kind of model as `prototype`.
    ///
    /// The prototype is not inspected.
    pub fn for_model<M: Differentiable>(_prototype: &M) -> Self {
        Self::default()
    }
}

impl<L: LineSearch> NLCG<L> {
    /// Set the convergence threshold on the squared step norm
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iteration(mut self, max_iteration: usize) -> Self {
        self.max_iteration = max_iteration;
        self
    }

    /// Set the scale of the bootstrap step
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    /// Replace the line-search strategy
    pub fn with_line_search<L2: LineSearch>(self, line_search: L2) -> NLCG<L2> {
        NLCG {
            precision: self.precision,
            max_iteration: self.max_iteration,
            initial_step: self.initial_step,
            line_search,
            collect_trace: self.collect_trace,
            step: self.step,
        }
    }

    /// Store per-iteration records in the result
    pub fn with_trace(mut self) -> Self {
        self.collect_trace = true;
        self
    }

    /// Steps taken by the most recent `optimize` call
    pub fn step(&self) -> usize {
        self.step
    }

    /// Check the configuration before a run
    pub fn validate(&self) -> Result<()> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "precision must be positive and finite, got {}",
                self.precision
            )));
        }
        if self.max_iteration == 0 {
            return Err(Error::InvalidParameter(
                "max_iteration must be at least 1".to_string(),
            ));
        }
        if !self.initial_step.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "initial_step must be finite, got {}",
                self.initial_step
            )));
        }
        self.line_search.validate()
    }

    /// Minimize `objective` starting from `model`.
    ///
    /// Returns the final iterate; running out of iterations is reported
    /// through `converged`/`termination`, not as an error. Errors are
    /// returned only for an invalid configuration or a gradient whose
    /// dimension does not match the model's tangent space.
    pub fn optimize<M, F, G>(
        &mut self,
        objective: &F,
        oracle: &G,
        model: M,
    ) -> Result<OptimizationResult<M>>
    where
        M: Differentiable<Scalar = f64> + Sync,
        M::TangentVector: Sync,
        F: ObjectiveFunction<M> + Sync + ?Sized,
        G: GradientOracle<M> + ?Sized,
    {
        self.validate()?;
        self.step = 0;

        let expected = model.zero_tangent().dimension();
        let gradient = |x: &M| -> Result<M::TangentVector> {
            let g = oracle.gradient_at(x, objective);
            let got = g.dimension();
            if got != expected {
                return Err(Error::DimensionMismatch { expected, got });
            }
            Ok(g)
        };

        let mut trace = self.collect_trace.then(Vec::new);

        let x_0 = model;
        let dx_0 = gradient(&x_0)?;

        // Bootstrap: fixed step along the initial gradient, no line search
        let mut x_n = x_0.moved_along(&dx_0.scaled(self.initial_step));
        let mut dx_prev = dx_0.clone();
        let mut s = dx_0;

        let mut termination = Termination::MaxIterationsReached;

        while self.step < self.max_iteration {
            let dx = gradient(&x_n)?;

            let beta = fletcher_reeves_beta(&dx, &dx_prev);

            // s_n = dx_n + beta_n * s_{n-1}
            s = dx.plus(&s.scaled(beta));

            let phi = |a: f64| objective.eval(&x_n.moved_along(&s.scaled(a)));
            let Some(alpha) = self.line_search.search(&phi) else {
                warn!(
                    "NLCG step {}: objective not finite along search direction",
                    self.step
                );
                termination = Termination::NonFiniteObjective;
                break;
            };

            let delta = s.scaled(alpha);
            x_n.move_along(&delta);

            let step_norm_squared = dot(&delta, &delta);

            if trace.is_some() || tracing::enabled!(tracing::Level::DEBUG) {
                let value = objective.eval(&x_n);
                debug!(
                    "NLCG step {:>4}: f = {:.6e}, beta = {:.3e}, alpha = {:+.2}, |step|^2 = {:.3e}",
                    self.step, value, beta, alpha, step_norm_squared
                );
                if let Some(records) = trace.as_mut() {
                    records.push(IterationRecord {
                        iteration: self.step,
                        value,
                        beta,
                        alpha,
                        step_norm_squared,
                    });
                }
            }

            // Exit when the step is too small
            if step_norm_squared < self.precision {
                termination = Termination::Converged;
                break;
            }

            dx_prev = dx;
            self.step += 1;
        }

        let value = objective.eval(&x_n);
        match termination {
            Termination::Converged => {
                debug!(
                    "NLCG converged after {} steps, f = {:.6e}",
                    self.step, value
                )
            }
            Termination::MaxIterationsReached => {
                warn!(
                    "NLCG reached max_iteration ({}), f = {:.6e}",
                    self.step, value
                )
            }
            Termination::NonFiniteObjective => {}
        }

        Ok(OptimizationResult {
            point: x_n,
            value,
            iterations: self.step,
            converged: termination == Termination::Converged,
            termination,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::line_search::FixedStep;
    use crate::manifolds::{Point2, Pose2};
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_defaults() {
        let nlcg = NLCG::new();
        assert_eq!(nlcg.precision, 1e-10);
        assert_eq!(nlcg.max_iteration, 400);
        assert_eq!(nlcg.initial_step, 1.0);
        assert_eq!(nlcg.line_search, GridSearch::default());
        assert_eq!(nlcg.step(), 0);
    }

    #[test]
    fn test_for_model_uses_defaults() {
        let nlcg = NLCG::for_model(&Pose2::new(1.0, 2.0, 0.5));
        assert_eq!(nlcg.precision, 1e-10);
        assert_eq!(nlcg.max_iteration, 400);
        assert_eq!(nlcg.initial_step, 1.0);
        assert_eq!(nlcg.line_search, GridSearch::default());
        assert_eq!(nlcg.step(), 0);
    }

    #[test]
    fn test_beta_guard_zero_previous_gradient() {
        let dx = Point2::new(1.0, 2.0);
        let zero = Point2::default();

        assert_eq!(fletcher_reeves_beta(&dx, &zero), 0.0);
        assert_eq!(fletcher_reeves_beta(&zero, &zero), 0.0);
        assert_relative_eq!(fletcher_reeves_beta(&dx, &Point2::new(0.0, 1.0)), 5.0);
    }

    #[test]
    fn test_invalid_configuration() {
        let objective = |p: &f64| p * p;
        let gradient = |p: &f64| 2.0 * p;

        let err = NLCG::new()
            .with_precision(0.0)
            .optimize(&objective, &gradient, 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = NLCG::new()
            .with_max_iteration(0)
            .optimize(&objective, &gradient, 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = NLCG::new()
            .with_initial_step(f64::NAN)
            .optimize(&objective, &gradient, 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_gradient_dimension_mismatch() {
        let objective = |p: &ndarray::Array1<f64>| p.dot(p);
        let wrong = |_p: &ndarray::Array1<f64>| arr1(&[1.0]);

        let err = NLCG::new()
            .optimize(&objective, &wrong, arr1(&[1.0, 2.0]))
            .unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_step_counter_is_observable() {
        let objective = |p: &f64| (p - 2.0) * (p - 2.0);
        let gradient = |p: &f64| 2.0 * (p - 2.0);

        let mut nlcg = NLCG::new();
        let result = nlcg.optimize(&objective, &gradient, 0.0).unwrap();

        assert!(result.converged);
        assert_eq!(nlcg.step(), result.iterations);
        assert!(nlcg.step() < 10);
        assert_relative_eq!(result.point, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_objective_stops() {
        let objective = |_p: &f64| f64::NAN;
        let gradient = |_p: &f64| 1.0;

        let result = NLCG::new().optimize(&objective, &gradient, 0.0).unwrap();

        assert!(!result.converged);
        assert_eq!(result.termination, Termination::NonFiniteObjective);
        assert_eq!(result.iterations, 0);
        // Only the bootstrap step was applied
        assert_relative_eq!(result.point, 1.0);
    }

    #[test]
    fn test_custom_line_search() {
        // A fixed step of -0.1 keeps shrinking x but never lands on 0
        let objective = |p: &f64| p * p;
        let gradient = |p: &f64| 2.0 * p;

        let mut nlcg = NLCG::new()
            .with_initial_step(0.0)
            .with_line_search(FixedStep(-0.1))
            .with_max_iteration(3)
            .with_trace();
        let result = nlcg.optimize(&objective, &gradient, 8.0).unwrap();

        let trace = result.trace.unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(result.termination, Termination::MaxIterationsReached);
        assert!(trace.iter().all(|r| r.alpha == -0.1));
        assert!(result.point.abs() < 8.0);
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(
            Termination::MaxIterationsReached.to_string(),
            "Maximum iterations reached"
        );
    }
}
