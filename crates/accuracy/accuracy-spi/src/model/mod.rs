//! Data models for accuracy tracking.

mod config;
mod performance;
mod record;

pub use config::AccuracyConfig;
pub use performance::{ModelPerformance, PerformanceKey};
pub use record::{AccuracyRecord, AccuracyReport};
