//! Prediction result types.

use chrono::{DateTime, NaiveDate, Utc};
use forecast_spi::Algorithm;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PredictionRequest;

/// One forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Start of the forecast bucket
    pub date: NaiveDate,
    pub predicted_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

/// Direction of the forecast over its horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub avg_predicted: f64,
    pub trend: TrendDirection,
}

/// A persisted forecast.
///
/// `points` has exactly `request.periods_ahead` entries in strictly
/// ascending date order, and `expires_at > generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: Uuid,
    pub request: PredictionRequest,
    /// Algorithm actually used, after defaulting
    pub algorithm: Algorithm,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub points: Vec<PredictionPoint>,
    /// Number of observations the model was fitted on
    pub training_points: usize,
    pub summary: PredictionSummary,
}

impl PredictionResult {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// The point whose bucket (at the request's period) contains `date`.
    pub fn point_for(&self, date: NaiveDate) -> Option<&PredictionPoint> {
        let period = self.request.period;
        self.points.iter().find(|p| period.same_bucket(p.date, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PredictionType;
    use chrono::Duration;
    use series_spi::Period;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_result() -> PredictionResult {
        let generated_at = Utc::now();
        PredictionResult {
            id: Uuid::new_v4(),
            request: PredictionRequest::new("u1", PredictionType::Expense)
                .with_period(Period::Monthly, 2),
            algorithm: Algorithm::Seasonal,
            generated_at,
            expires_at: generated_at + Duration::days(7),
            points: vec![
                PredictionPoint {
                    date: date(2024, 6, 1),
                    predicted_value: 100.0,
                    lower_bound: Some(80.0),
                    upper_bound: Some(120.0),
                },
                PredictionPoint {
                    date: date(2024, 7, 1),
                    predicted_value: 110.0,
                    lower_bound: None,
                    upper_bound: None,
                },
            ],
            training_points: 23,
            summary: PredictionSummary {
                avg_predicted: 105.0,
                trend: TrendDirection::Rising,
            },
        }
    }

    #[test]
    fn test_point_lookup_at_period_granularity() {
        let result = monthly_result();
        assert_eq!(result.point_for(date(2024, 6, 17)).unwrap().predicted_value, 100.0);
        assert_eq!(result.point_for(date(2024, 7, 31)).unwrap().predicted_value, 110.0);
        assert!(result.point_for(date(2024, 8, 1)).is_none());
    }

    #[test]
    fn test_expiry() {
        let result = monthly_result();
        assert!(!result.is_expired(result.generated_at));
        assert!(result.is_expired(result.expires_at));
    }

    #[test]
    fn test_point_without_bounds_omits_them() {
        let result = monthly_result();
        let json = serde_json::to_value(&result.points[1]).unwrap();
        assert!(json.get("lower_bound").is_none());
        assert_eq!(json["date"], "2024-07-01");
        let json = serde_json::to_value(&result.summary).unwrap();
        assert_eq!(json["trend"], "rising");
    }
}
