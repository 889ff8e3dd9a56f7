//! Error types for the mechanical solvers

use thiserror::Error;

/// Main error type for solver operations
#[derive(Error, Debug)]
pub enum MechError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Singular stiffness matrix - reduced system is not invertible")]
    SingularSystem,

    #[error("Unstable time integration: {0}")]
    Unstable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type MechResult<T> = Result<T, MechError>;

/// Reject a non-finite or non-positive quantity
pub(crate) fn require_positive(name: &str, value: f64) -> MechResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MechError::InvalidConfiguration(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

/// Reject a non-finite quantity (sign is free)
pub(crate) fn require_finite(name: &str, value: f64) -> MechResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MechError::InvalidConfiguration(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Reject a count outside `[min, max]`
pub(crate) fn require_count(name: &str, value: usize, min: usize, max: usize) -> MechResult<usize> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(MechError::InvalidConfiguration(format!(
            "{} must lie in [{}, {}], got {}",
            name, min, max, value
        )))
    }
}
