//! Forecast error types

use thiserror::Error;

/// Errors that can occur while fitting a model or producing a forecast
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The model could not be fitted to the series (NaNs, degenerate input)
    #[error("Model fit failed: {0}")]
    ModelFit(String),

    /// The fit did not finish within its wall-clock budget
    #[error("Model fit exceeded its {budget_ms} ms budget")]
    ModelFitTimeout { budget_ms: u64 },

    /// The requested algorithm is not one of the known variants
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl ForecastError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
