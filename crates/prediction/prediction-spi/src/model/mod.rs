//! Data models for the prediction engine.

mod batch;
mod request;
mod result;

pub use batch::{BatchEntry, BatchItemFailure, BatchResult};
pub use request::{PredictionRequest, PredictionType, MAX_PERIODS_AHEAD};
pub use result::{PredictionPoint, PredictionResult, PredictionSummary, TrendDirection};
