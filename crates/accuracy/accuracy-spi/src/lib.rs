//! Accuracy Service Provider Interface
//!
//! Defines the persistence contract for forecasts and their accuracy, and
//! the records kept about them:
//!
//! - [`PredictionStore`]: results with a TTL, accuracy records keyed by
//!   `(prediction_id, point_date)`, one performance row per
//!   `(algorithm, prediction_type)` updated by compare-and-swap
//! - [`AccuracyRecord`] / [`ModelPerformance`] / [`PerformanceKey`]
//! - [`AccuracyError`] / [`StoreError`]

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::PredictionStore;
pub use error::{AccuracyError, Result, StoreError, StoreResult};
pub use model::{AccuracyConfig, AccuracyRecord, AccuracyReport, ModelPerformance, PerformanceKey};
