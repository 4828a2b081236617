//! Accuracy Core
//!
//! Closes the loop between forecasts and what actually happened:
//!
//! - [`AccuracyTracker`]: stores results, reconciles reported actual values
//!   and keeps the per-model performance rows current
//! - [`metrics`]: the error metrics behind every performance row
//! - [`InMemoryPredictionStore`]: a [`PredictionStore`] backed by maps

pub mod metrics;
mod store;
mod tracker;

// Re-export SPI types for implementations
pub use accuracy_spi::{
    AccuracyConfig, AccuracyError, AccuracyRecord, AccuracyReport, ModelPerformance,
    PerformanceKey, PredictionStore, Result, StoreError, StoreResult,
};

pub use metrics::PerformanceSummary;
pub use store::InMemoryPredictionStore;
pub use tracker::AccuracyTracker;
