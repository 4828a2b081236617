//! Anomaly Detection API
//!
//! Configuration types for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyKind, AnomalyRecord, Result, ScanTarget, Severity,
};

/// Anomaly detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Days of expense history scanned (default: 90).
    pub window_days: u32,
    /// Spread multiplier for `high` severity (default: 3.0).
    pub high_k: f64,
    /// Spread multiplier for `medium` severity (default: 2.0).
    pub medium_k: f64,
    /// Spread multiplier for `low` severity (default: 1.5).
    pub low_k: f64,
    /// A week above `spike_ratio` x its trailing average is a category spike (default: 2.0).
    pub spike_ratio: f64,
    /// Number of trailing weeks averaged for the category baseline (default: 4).
    pub spike_trailing_weeks: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            high_k: 3.0,
            medium_k: 2.0,
            low_k: 1.5,
            spike_ratio: 2.0,
            spike_trailing_weeks: 4,
        }
    }
}

impl AnomalyConfig {
    /// Severity thresholds as `(k, severity)`, strictest first.
    pub fn severity_levels(&self) -> [(f64, Severity); 3] {
        [
            (self.high_k, Severity::High),
            (self.medium_k, Severity::Medium),
            (self.low_k, Severity::Low),
        ]
    }

    /// Check that thresholds are positive and ordered `high >= medium >= low`.
    pub fn validate(&self) -> Result<()> {
        if self.window_days < 7 {
            return Err(AnomalyError::invalid_parameter(
                "window_days",
                "must cover at least one week",
            ));
        }
        if !(self.low_k > 0.0 && self.medium_k >= self.low_k && self.high_k >= self.medium_k) {
            return Err(AnomalyError::invalid_parameter(
                "high_k/medium_k/low_k",
                "must be positive and ordered high >= medium >= low",
            ));
        }
        if !(self.spike_ratio > 1.0) {
            return Err(AnomalyError::invalid_parameter(
                "spike_ratio",
                "must be greater than 1",
            ));
        }
        if self.spike_trailing_weeks == 0 {
            return Err(AnomalyError::invalid_parameter(
                "spike_trailing_weeks",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnomalyConfig::default();
        assert_eq!(config.window_days, 90);
        assert_eq!(config.spike_trailing_weeks, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_levels_strictest_first() {
        let levels = AnomalyConfig::default().severity_levels();
        assert_eq!(levels[0], (3.0, Severity::High));
        assert_eq!(levels[2], (1.5, Severity::Low));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let config = AnomalyConfig {
            medium_k: 4.0,
            ..AnomalyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnomalyError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_ratio_must_exceed_one() {
        let config = AnomalyConfig {
            spike_ratio: 1.0,
            ..AnomalyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: AnomalyConfig = serde_json::from_str(r#"{"high_k": 4.0}"#).unwrap();
        assert_eq!(config.high_k, 4.0);
        assert_eq!(config.low_k, 1.5);
    }
}
