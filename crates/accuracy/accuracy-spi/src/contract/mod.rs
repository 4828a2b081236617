//! Contracts (traits) for prediction persistence.

mod prediction_store;

pub use prediction_store::PredictionStore;
