//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl AnomalyError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnomalyError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = AnomalyError::InsufficientData {
            required: 7,
            got: 3,
        };
        assert_eq!(error.to_string(), "Insufficient data: required 7, got 3");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = AnomalyError::invalid_parameter("high_k", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter: high_k - must be positive"
        );
    }

    #[test]
    fn test_invalid_parameter_special_characters() {
        let error = AnomalyError::invalid_parameter("spike_ratio", "must be in range (1, 100]");
        assert_eq!(
            error.to_string(),
            "Invalid parameter: spike_ratio - must be in range (1, 100]"
        );
    }

    #[test]
    fn test_insufficient_data_debug() {
        let error = AnomalyError::InsufficientData {
            required: 10,
            got: 5,
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InsufficientData"));
        assert!(debug_str.contains("10"));
        assert!(debug_str.contains("5"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(AnomalyError::invalid_parameter("window_days", "zero"));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_all_error_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnomalyError>();
    }
}
