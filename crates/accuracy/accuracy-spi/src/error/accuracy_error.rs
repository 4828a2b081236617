//! Accuracy tracking error types

use chrono::NaiveDate;
use prediction_spi::{ErrorKind, PredictionServiceError};
use thiserror::Error;
use uuid::Uuid;

use crate::model::PerformanceKey;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, AccuracyError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store failures. Always infrastructure; never retried here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Prediction store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while recording predictions and reconciling actual values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccuracyError {
    /// No live (unexpired) result with this id
    #[error("Prediction {0} not found")]
    PredictionNotFound(Uuid),

    /// The result exists but has no point covering the date
    #[error("Prediction {id} has no point covering {date}")]
    PointNotFound { id: Uuid, date: NaiveDate },

    /// Malformed report (negative amount, future date, non-finite value)
    #[error("Invalid accuracy report: {0}")]
    Validation(String),

    /// The performance row kept changing underneath every attempt
    #[error("Performance for {key} still contended after {attempts} attempts")]
    Contention { key: PerformanceKey, attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AccuracyError> for PredictionServiceError {
    fn from(error: AccuracyError) -> Self {
        let message = error.to_string();
        match error {
            AccuracyError::PredictionNotFound(_) | AccuracyError::PointNotFound { .. } => {
                PredictionServiceError::domain(ErrorKind::PredictionNotFound, message)
            }
            AccuracyError::Validation(_) => {
                PredictionServiceError::domain(ErrorKind::Validation, message)
            }
            AccuracyError::Contention { .. } | AccuracyError::Store(_) => {
                PredictionServiceError::Infrastructure(message)
            }
        }
    }
}

impl From<StoreError> for PredictionServiceError {
    fn from(error: StoreError) -> Self {
        PredictionServiceError::Infrastructure(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_spi::Algorithm;
    use prediction_spi::PredictionType;

    #[test]
    fn test_point_not_found_display() {
        let id = Uuid::nil();
        let error = AccuracyError::PointNotFound {
            id,
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Prediction 00000000-0000-0000-0000-000000000000 has no point covering 2024-02-29"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error: AccuracyError = StoreError::Unavailable("timeout".into()).into();
        assert_eq!(error.to_string(), "Prediction store unavailable: timeout");
    }

    #[test]
    fn test_contention_display() {
        let error = AccuracyError::Contention {
            key: PerformanceKey::new(Algorithm::Linear, PredictionType::Savings),
            attempts: 16,
        };
        assert_eq!(
            error.to_string(),
            "Performance for linear/savings still contended after 16 attempts"
        );
    }

    #[test]
    fn test_boundary_mapping() {
        let not_found: PredictionServiceError = AccuracyError::PredictionNotFound(Uuid::nil()).into();
        assert_eq!(not_found.kind(), Some(ErrorKind::PredictionNotFound));

        let invalid: PredictionServiceError = AccuracyError::Validation("negative".into()).into();
        assert_eq!(invalid.kind(), Some(ErrorKind::Validation));

        let store: PredictionServiceError =
            AccuracyError::Store(StoreError::Unavailable("down".into())).into();
        assert!(store.is_infrastructure());
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccuracyError>();
        assert_send_sync::<StoreError>();
    }
}
