//! Series error types
//!
//! Defines the error type for ledger reads and series preparation.

use thiserror::Error;

/// Result type alias for series operations
pub type Result<T> = std::result::Result<T, SeriesError>;

/// Errors that can occur while preparing a series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Too few non-zero observations in the lookback window
    #[error("Insufficient data: need at least {required} non-zero observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The requested window is empty or inverted
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// The ledger collaborator could not be read
    #[error("Ledger unavailable: {0}")]
    Ledger(String),

    /// The category collaborator could not be read
    #[error("Category service unavailable: {0}")]
    Category(String),
}

impl SeriesError {
    /// Whether this error comes from an unreachable collaborator rather than
    /// from the caller's data.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, SeriesError::Ledger(_) | SeriesError::Category(_))
    }
}
