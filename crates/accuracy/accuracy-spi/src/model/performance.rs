//! Model performance aggregate.

use chrono::{DateTime, Utc};
use forecast_spi::Algorithm;
use prediction_spi::PredictionType;
use serde::{Deserialize, Serialize};

/// Identity of a performance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformanceKey {
    pub algorithm: Algorithm,
    pub prediction_type: PredictionType,
}

impl PerformanceKey {
    pub fn new(algorithm: Algorithm, prediction_type: PredictionType) -> Self {
        Self {
            algorithm,
            prediction_type,
        }
    }
}

impl std::fmt::Display for PerformanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.algorithm, self.prediction_type)
    }
}

/// One aggregate row per `(algorithm, prediction_type)`.
///
/// `version` increases by one on every successful swap; `sample_count`
/// never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub algorithm: Algorithm,
    pub prediction_type: PredictionType,
    /// `clamp(1 - mean(percentage_error), 0, 1)`
    pub accuracy_score: f64,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    pub sample_count: u64,
    pub last_updated: DateTime<Utc>,
    pub version: u64,
}

impl ModelPerformance {
    pub fn key(&self) -> PerformanceKey {
        PerformanceKey::new(self.algorithm, self.prediction_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = PerformanceKey::new(Algorithm::MovingAverage, PredictionType::Category);
        assert_eq!(key.to_string(), "moving_average/category");
    }

    #[test]
    fn test_row_key() {
        let row = ModelPerformance {
            algorithm: Algorithm::Seasonal,
            prediction_type: PredictionType::Income,
            accuracy_score: 0.9,
            mae: 1.0,
            rmse: 1.5,
            r2: 0.8,
            sample_count: 3,
            last_updated: Utc::now(),
            version: 1,
        };
        assert_eq!(
            row.key(),
            PerformanceKey::new(Algorithm::Seasonal, PredictionType::Income)
        );
    }
}
