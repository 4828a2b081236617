//! Prediction service error types
//!
//! Every lower-level error is folded into [`PredictionServiceError`] at the
//! orchestrator boundary. Domain errors carry an [`ErrorKind`] and a message
//! fit for the end user; infrastructure failures are kept apart and are never
//! retried by the engine.

use anomaly_spi::AnomalyError;
use forecast_spi::ForecastError;
use serde::{Deserialize, Serialize};
use series_spi::SeriesError;
use thiserror::Error;

/// Result type alias for prediction operations
pub type Result<T> = std::result::Result<T, PredictionServiceError>;

/// Domain error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InsufficientData,
    InvalidCategory,
    UnsupportedAlgorithm,
    ModelFit,
    ModelFitTimeout,
    PredictionNotFound,
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InsufficientData => "insufficient_data",
            ErrorKind::InvalidCategory => "invalid_category",
            ErrorKind::UnsupportedAlgorithm => "unsupported_algorithm",
            ErrorKind::ModelFit => "model_fit",
            ErrorKind::ModelFitTimeout => "model_fit_timeout",
            ErrorKind::PredictionNotFound => "prediction_not_found",
            ErrorKind::Validation => "validation",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one error type returned by the prediction service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionServiceError {
    /// A problem with the request or its data; maps to a 4xx response
    #[error("{message}")]
    Domain { kind: ErrorKind, message: String },

    /// A collaborator or store could not be reached
    #[error("Service unavailable: {0}")]
    Infrastructure(String),
}

impl PredictionServiceError {
    pub fn domain(kind: ErrorKind, message: impl Into<String>) -> Self {
        PredictionServiceError::Domain {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::domain(ErrorKind::Validation, message)
    }

    pub fn invalid_category(category_id: &str) -> Self {
        Self::domain(
            ErrorKind::InvalidCategory,
            format!("Category '{}' does not exist or is not owned by the user", category_id),
        )
    }

    /// The domain kind, `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PredictionServiceError::Domain { kind, .. } => Some(*kind),
            PredictionServiceError::Infrastructure(_) => None,
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, PredictionServiceError::Infrastructure(_))
    }
}

impl From<SeriesError> for PredictionServiceError {
    fn from(error: SeriesError) -> Self {
        let message = error.to_string();
        match error {
            SeriesError::InsufficientData { .. } => {
                Self::domain(ErrorKind::InsufficientData, message)
            }
            SeriesError::InvalidWindow(_) => Self::domain(ErrorKind::Validation, message),
            SeriesError::Ledger(_) | SeriesError::Category(_) => {
                PredictionServiceError::Infrastructure(message)
            }
        }
    }
}

impl From<ForecastError> for PredictionServiceError {
    fn from(error: ForecastError) -> Self {
        let kind = match &error {
            ForecastError::InsufficientData { .. } => ErrorKind::InsufficientData,
            ForecastError::InvalidParameter { .. } => ErrorKind::Validation,
            ForecastError::ModelFit(_) => ErrorKind::ModelFit,
            ForecastError::ModelFitTimeout { .. } => ErrorKind::ModelFitTimeout,
            ForecastError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
        };
        Self::domain(kind, error.to_string())
    }
}

impl From<AnomalyError> for PredictionServiceError {
    fn from(error: AnomalyError) -> Self {
        let kind = match &error {
            AnomalyError::InsufficientData { .. } => ErrorKind::InsufficientData,
            AnomalyError::InvalidParameter { .. } => ErrorKind::Validation,
        };
        Self::domain(kind, error.to_string())
    }
}
