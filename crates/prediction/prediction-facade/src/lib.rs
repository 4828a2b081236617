//! Prediction Facade
//!
//! High-level API for the forecasting engine. Re-exports the service, its
//! configuration, the request and result models, and the in-memory
//! collaborators used for fixtures and tests.

// Re-export the service and its building blocks
pub use prediction_core::{
    model_params, summarize, FitExecutor, ForecastOrchestrator, ModelRegistry, PredictionService,
};

// Re-export configuration
pub use prediction_api::{
    AccuracyConfig, AnomalyConfig, ConfigError, DefaultAlgorithms, EngineConfig,
    ForecastSettings, LookbackDays,
};

// Re-export request, result and error models
pub use prediction_spi::{
    Algorithm, BatchEntry, BatchItemFailure, BatchResult, ErrorKind, Period, PredictionPoint,
    PredictionRequest, PredictionResult, PredictionServiceError, PredictionSummary,
    PredictionType, Result, TrendDirection, MAX_PERIODS_AHEAD,
};
pub use accuracy_spi::{
    AccuracyRecord, AccuracyReport, ModelPerformance, PerformanceKey, PredictionStore,
};
pub use anomaly_spi::{AnomalyKind, AnomalyRecord, Severity};

// Re-export ledger contracts and in-memory collaborators
pub use accuracy_core::InMemoryPredictionStore;
pub use series_core::{InMemoryCategories, InMemoryLedger};
pub use series_spi::{CategoryService, LedgerEntry, TransactionKind, TransactionLedgerReader};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        AccuracyReport, Algorithm, EngineConfig, Period, PredictionRequest, PredictionResult,
        PredictionService, PredictionServiceError, PredictionType,
    };
}
