//! Prediction API
//!
//! Configuration types for the prediction engine.

mod config;
mod error;

pub use config::{DefaultAlgorithms, EngineConfig, ForecastSettings, LookbackDays};
pub use error::ConfigError;

// Re-export the configs of the layers below
pub use accuracy_spi::AccuracyConfig;
pub use anomaly_api::AnomalyConfig;

// Re-export SPI types
pub use prediction_spi::{
    Algorithm, BatchEntry, BatchItemFailure, BatchResult, ErrorKind, Period, PredictionPoint,
    PredictionRequest, PredictionResult, PredictionServiceError, PredictionSummary,
    PredictionType, Result, TrendDirection,
};
