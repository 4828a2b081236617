//! Accuracy records and reports.

use chrono::{DateTime, NaiveDate, Utc};
use forecast_spi::Algorithm;
use prediction_spi::PredictionType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PerformanceKey;

/// An actual value reported against a stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub prediction_id: Uuid,
    pub actual_value: f64,
    pub observation_date: NaiveDate,
}

/// Reconciliation of one forecast point, keyed by `(prediction_id, point_date)`.
///
/// `algorithm` and `prediction_type` are copied from the result so the
/// performance recompute can select records by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    pub prediction_id: Uuid,
    pub point_date: NaiveDate,
    pub algorithm: Algorithm,
    pub prediction_type: PredictionType,
    pub predicted_value: f64,
    pub actual_value: Option<f64>,
    pub absolute_error: Option<f64>,
    pub percentage_error: Option<f64>,
    pub reported_at: Option<DateTime<Utc>>,
}

impl AccuracyRecord {
    pub fn key(&self) -> PerformanceKey {
        PerformanceKey::new(self.algorithm, self.prediction_type)
    }

    /// `(actual, predicted)` once an actual value has been reported.
    pub fn pair(&self) -> Option<(f64, f64)> {
        self.actual_value.map(|actual| (actual, self.predicted_value))
    }
}
