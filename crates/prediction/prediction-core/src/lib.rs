//! Prediction Core
//!
//! Wires the series, forecast, anomaly and accuracy layers into one engine:
//!
//! - [`ForecastOrchestrator`]: request validation, model selection, fitting
//!   and result assembly, including the derived savings and balance series
//! - [`FitExecutor`]: CPU-bound fits on a dedicated pool under a time budget
//! - [`ModelRegistry`]: the current forecasting settings, swapped atomically
//! - [`PredictionService`]: batches, anomaly scans and accuracy reporting on
//!   top of the orchestrator

mod executor;
mod orchestrator;
mod registry;
mod service;

// Re-export the boundary types callers need
pub use prediction_api::{EngineConfig, ForecastSettings};
pub use prediction_spi::{PredictionServiceError, Result};

pub use executor::FitExecutor;
pub use orchestrator::{summarize, ForecastOrchestrator};
pub use registry::{model_params, ModelRegistry};
pub use service::PredictionService;
