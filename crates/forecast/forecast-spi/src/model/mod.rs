//! Model module containing data structures

mod algorithm;
mod decomposition_result;
mod forecast_output;

pub use algorithm::Algorithm;
pub use decomposition_result::DecompositionResult;
pub use forecast_output::ForecastOutput;
