pub mod differentiation;
pub mod line_search;
pub mod optimization;

pub use differentiation::{
    basis_vector, basis_vectors, jacobian, numerical_gradient, CentralDifference,
};
pub use line_search::{FixedStep, GridSearch, LineSearch};
pub use optimization::{
    fletcher_reeves_beta, GradientOracle, IterationRecord, ObjectiveFunction, OptimizationResult,
    Termination, NLCG,
};
