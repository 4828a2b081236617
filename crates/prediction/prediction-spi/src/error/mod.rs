//! Error types for the prediction service boundary.

mod prediction_error;

pub use prediction_error::{ErrorKind, PredictionServiceError, Result};
