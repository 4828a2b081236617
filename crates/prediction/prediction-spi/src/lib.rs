//! Prediction Service Provider Interface
//!
//! Types exchanged with the prediction engine:
//!
//! - [`PredictionRequest`] / [`PredictionType`]: what to forecast
//! - [`PredictionResult`] / [`PredictionPoint`] / [`PredictionSummary`]: the
//!   persisted forecast
//! - [`BatchResult`]: partial-success outcome of a batch
//! - [`PredictionServiceError`]: the single error type callers see, carrying
//!   an [`ErrorKind`] from the domain taxonomy

pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use error::{ErrorKind, PredictionServiceError, Result};
pub use model::{
    BatchEntry, BatchItemFailure, BatchResult, PredictionPoint, PredictionRequest, PredictionResult,
    PredictionSummary, PredictionType, TrendDirection, MAX_PERIODS_AHEAD,
};

// Types that appear in requests and results
pub use forecast_spi::Algorithm;
pub use series_spi::Period;
