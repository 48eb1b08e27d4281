//! Error types for robust light curve detrending
//!
//! Provides a unified error type for all robust-* crates.

use thiserror::Error;

/// Core error type for detrending and location estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Detrending method name not in the supported set
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// An external trend backend was selected but none is registered
    #[error("Missing collaborator for method '{method}': {dependency} is not available")]
    MissingCollaborator { method: String, dependency: String },

    /// Segmentation or trend assembly produced inconsistent lengths
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a tail proportion outside the open interval (0, 0.5)
    pub fn invalid_proportion(p: f64) -> Self {
        Self::InvalidParameter(format!("proportiontocut {p} must be >0 and <0.5"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a segment whose trend length disagrees with its bounds
    pub fn segment_mismatch(segment: usize, expected: usize, actual: usize) -> Self {
        Self::InternalConsistency(format!(
            "segment {segment} produced {actual} trend values for {expected} samples"
        ))
    }
}
