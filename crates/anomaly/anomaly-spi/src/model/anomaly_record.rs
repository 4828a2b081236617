//! Anomaly record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How far outside the expected range an observation fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which check produced the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A day's total far above the robust center of the window
    DailySpike,
    /// A week's category total far above its trailing weekly average
    CategorySpike { category_id: String },
}

/// One flagged observation. Produced on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub user_id: String,
    /// Day (or week start for category spikes) of the observation
    pub date: NaiveDate,
    pub observed_value: f64,
    /// `(low, high)` range the observation was expected to fall in
    pub expected_range: (f64, f64),
    pub severity: Severity,
    pub kind: AnomalyKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert_eq!(Severity::High.to_string(), "high");
    }

    #[test]
    fn test_record_serializes_kind_with_tag() {
        let record = AnomalyRecord {
            user_id: "u1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            observed_value: 900.0,
            expected_range: (0.0, 200.0),
            severity: Severity::Medium,
            kind: AnomalyKind::CategorySpike {
                category_id: "food".to_string(),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["kind"]["type"], "category_spike");
        assert_eq!(json["kind"]["category_id"], "food");
        assert_eq!(json["date"], "2024-05-06");

        let back: AnomalyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
