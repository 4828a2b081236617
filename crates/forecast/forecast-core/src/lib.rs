//! Forecast Core
//!
//! Implementations of the forecasting variants and the pieces they are
//! built from:
//!
//! - [`models`]: `SeasonalDecomposition`, `LinearTrend`, `MovingAverage`
//! - [`decomposition`] / [`seasonality`]: additive decomposition and
//!   autocorrelation-based cycle detection
//! - [`confidence`]: residual spread and horizon-scaled bands
//! - [`derive`]: savings and balance arithmetic over primitive forecasts

pub mod confidence;
pub mod decomposition;
pub mod derive;
pub mod models;
pub mod seasonality;
pub mod stats;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    Algorithm, DecompositionResult, Decomposer, ForecastError, ForecastModel, ForecastOutput,
    Result, SeasonalityDetector,
};

// Re-export main types
pub use decomposition::AdditiveDecomposer;
pub use derive::{accumulate_balance, derive_savings};
pub use models::{model_for, LinearTrend, ModelParams, MovingAverage, SeasonalDecomposition};
pub use seasonality::AutocorrelationDetector;
