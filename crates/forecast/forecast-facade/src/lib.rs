//! Forecast Facade
//!
//! High-level API for forecasting. Re-exports all public types from the
//! forecast stack for convenient usage.

// Re-export core modules for direct access
pub use forecast_core::{confidence, decomposition, derive, models, seasonality, stats};

// Re-export main types at root
pub use forecast_core::{
    accumulate_balance, derive_savings, model_for, AdditiveDecomposer, AutocorrelationDetector,
    LinearTrend, ModelParams, MovingAverage, SeasonalDecomposition,
};

// Re-export SPI traits and models
pub use forecast_spi::{
    Algorithm, DecompositionResult, Decomposer, ForecastError, ForecastModel, ForecastOutput,
    Result, SeasonalityDetector,
};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        accumulate_balance, derive_savings, model_for, Algorithm, ForecastModel, ForecastOutput,
        ModelParams,
    };
}
