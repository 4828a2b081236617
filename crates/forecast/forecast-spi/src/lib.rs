//! Forecast Service Provider Interface
//!
//! Defines the narrow contract every forecasting variant implements, the
//! decomposition and seasonality seams the seasonal variant is built from,
//! and the forecast error type.
//!
//! - [`ForecastModel`]: `fit_predict(series, horizon, want_intervals)`
//! - [`Algorithm`]: the selectable variants
//! - [`ForecastOutput`]: point forecast with optional bounds

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Decomposer, ForecastModel, SeasonalityDetector};
pub use error::{ForecastError, Result};
pub use model::{Algorithm, DecompositionResult, ForecastOutput};
