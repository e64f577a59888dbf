use thiserror::Error;

/// Errors that can occur while configuring or running an optimizer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Tangent vector has the wrong number of scalar components
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Computation failed (e.g., non-finite finite-difference step)
    #[error("computation failed: {0}")]
    ComputationFailed(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for optimizer and differentiation operations
pub type Result<T> = std::result::Result<T, Error>;
