//! Contract module containing trait definitions for forecast operations

mod decomposer;
mod forecast_model;
mod seasonality_detector;

pub use decomposer::Decomposer;
pub use forecast_model::ForecastModel;
pub use seasonality_detector::SeasonalityDetector;
