//! Anomaly detector implementations.

use std::collections::BTreeMap;

use anomaly_api::AnomalyConfig;
use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyKind, AnomalyRecord, Result, ScanTarget, Severity,
};
use chrono::NaiveDate;
use series_spi::Period;

use crate::robust::robust_spread;

/// Fewest observations either detector will look at.
pub const MIN_POINTS: usize = 7;

// ============================================================================
// MAD Detector
// ============================================================================

/// Median / MAD based spike detector.
///
/// A value above `median + k * spread` is flagged with the severity of the
/// largest `k` it exceeds. Only upward spikes are reported. A series with no
/// spread at all yields no records.
#[derive(Debug, Clone, Default)]
pub struct MadDetector {
    config: AnomalyConfig,
}

impl MadDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    fn severity(&self, value: f64, center: f64, spread: f64) -> Option<Severity> {
        self.config
            .severity_levels()
            .into_iter()
            .find(|(k, _)| value > center + k * spread)
            .map(|(_, severity)| severity)
    }
}

impl AnomalyDetector for MadDetector {
    fn detect(&self, target: &ScanTarget<'_>) -> Result<Vec<AnomalyRecord>> {
        let values = &target.series.values;
        if values.len() < MIN_POINTS {
            return Err(AnomalyError::InsufficientData {
                required: MIN_POINTS,
                got: values.len(),
            });
        }

        let Some((center, spread)) = robust_spread(values) else {
            return Ok(Vec::new());
        };
        if spread <= f64::EPSILON {
            return Ok(Vec::new());
        }

        let expected_range = (
            (center - self.config.low_k * spread).max(0.0),
            center + self.config.low_k * spread,
        );
        let kind = match target.category_id {
            Some(category_id) => AnomalyKind::CategorySpike {
                category_id: category_id.to_string(),
            },
            None => AnomalyKind::DailySpike,
        };

        Ok(target
            .series
            .points()
            .into_iter()
            .filter_map(|point| {
                self.severity(point.value, center, spread)
                    .map(|severity| AnomalyRecord {
                        user_id: target.user_id.to_string(),
                        date: point.date,
                        observed_value: point.value,
                        expected_range,
                        severity,
                        kind: kind.clone(),
                    })
            })
            .collect())
    }
}

// ============================================================================
// Category Spike Detector
// ============================================================================

/// Weekly category spike detector.
///
/// Daily category totals are summed into ISO weeks (Monday start). A week
/// whose total exceeds `spike_ratio` times the mean of the preceding
/// `spike_trailing_weeks` weeks is flagged. The in-progress final week is
/// included; a partial leading week is not, since it would understate the
/// baseline. Weeks whose baseline is zero are skipped.
///
/// Severity scales with the ratio: `>= 2 * spike_ratio` is high,
/// `>= 1.5 * spike_ratio` is medium, anything else above `spike_ratio` is low.
#[derive(Debug, Clone, Default)]
pub struct CategorySpikeDetector {
    config: AnomalyConfig,
}

impl CategorySpikeDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    fn severity(&self, ratio: f64) -> Severity {
        if ratio >= 2.0 * self.config.spike_ratio {
            Severity::High
        } else if ratio >= 1.5 * self.config.spike_ratio {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Weekly totals of a daily series, oldest first, without a partial leading week.
fn weekly_totals(start: NaiveDate, points: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64)> {
    let mut weeks: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, value) in points {
        *weeks.entry(Period::Weekly.bucket_start(*date)).or_insert(0.0) += value;
    }
    let first_full = if Period::Weekly.bucket_start(start) == start {
        start
    } else {
        Period::Weekly.next_start(start)
    };
    weeks.into_iter().filter(|(week, _)| *week >= first_full).collect()
}

impl AnomalyDetector for CategorySpikeDetector {
    fn detect(&self, target: &ScanTarget<'_>) -> Result<Vec<AnomalyRecord>> {
        let category_id = target.category_id.ok_or_else(|| {
            AnomalyError::invalid_parameter("category_id", "required for category spike detection")
        })?;
        if target.series.period != Period::Daily {
            return Err(AnomalyError::invalid_parameter(
                "period",
                "category spike detection expects a daily series",
            ));
        }
        if target.series.len() < MIN_POINTS {
            return Err(AnomalyError::InsufficientData {
                required: MIN_POINTS,
                got: target.series.len(),
            });
        }

        let daily: Vec<(NaiveDate, f64)> = target
            .series
            .points()
            .into_iter()
            .map(|p| (p.date, p.value))
            .collect();
        let weeks = weekly_totals(target.series.start, &daily);
        let trailing = self.config.spike_trailing_weeks;

        let mut records = Vec::new();
        for i in trailing..weeks.len() {
            let baseline =
                weeks[i - trailing..i].iter().map(|(_, v)| v).sum::<f64>() / trailing as f64;
            if baseline <= f64::EPSILON {
                continue;
            }
            let (week, total) = weeks[i];
            let ratio = total / baseline;
            if ratio > self.config.spike_ratio {
                records.push(AnomalyRecord {
                    user_id: target.user_id.to_string(),
                    date: week,
                    observed_value: total,
                    expected_range: (0.0, self.config.spike_ratio * baseline),
                    severity: self.severity(ratio),
                    kind: AnomalyKind::CategorySpike {
                        category_id: category_id.to_string(),
                    },
                });
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use series_spi::PreparedSeries;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 90 days starting on a Monday: weekdays around 50,000, weekends 150,000
    fn weekend_heavy(noise: bool) -> PreparedSeries {
        let values = (0..90)
            .map(|i| {
                if i % 7 >= 5 {
                    150_000.0
                } else if noise {
                    50_000.0 + (i % 3) as f64 * 500.0
                } else {
                    50_000.0
                }
            })
            .collect();
        PreparedSeries::new(Period::Daily, date(2024, 1, 1), values)
    }

    #[test]
    fn test_weekend_spikes_are_high() {
        let series = weekend_heavy(true);
        let records = MadDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap();

        // 12 full weeks plus a Monday-to-Saturday tail: 25 weekend days
        assert_eq!(records.len(), 25);
        for record in &records {
            assert_eq!(record.severity, Severity::High);
            assert_eq!(record.observed_value, 150_000.0);
            assert_eq!(record.kind, AnomalyKind::DailySpike);
            assert!(record.expected_range.1 < 150_000.0);
        }
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_zero_mad_uses_mean_deviation() {
        let series = weekend_heavy(false);
        let records = MadDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap();
        assert_eq!(records.len(), 25);
        assert!(records.iter().all(|r| r.severity == Severity::High));
    }

    #[test]
    fn test_severity_bands() {
        // median 10, MAD 1
        let mut values = vec![9.0, 10.0, 11.0, 9.0, 10.0, 11.0, 10.0, 9.0, 11.0, 10.0];
        values.extend([11.8, 12.5, 13.5]);
        let series = PreparedSeries::new(Period::Daily, date(2024, 1, 1), values);
        let records = MadDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap();

        let severities: Vec<Severity> = records.iter().map(|r| r.severity).collect();
        assert_eq!(severities, vec![Severity::Low, Severity::Medium, Severity::High]);
    }

    #[test]
    fn test_flat_series_has_no_anomalies() {
        let series = PreparedSeries::new(Period::Daily, date(2024, 1, 1), vec![20.0; 30]);
        let records = MadDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let series = PreparedSeries::new(Period::Daily, date(2024, 1, 1), vec![1.0; 3]);
        let err = MadDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap_err();
        assert_eq!(err, AnomalyError::InsufficientData { required: 7, got: 3 });
    }

    fn weeks_of(per_day: &[f64]) -> Vec<f64> {
        per_day.iter().flat_map(|&v| std::iter::repeat(v).take(7)).collect()
    }

    #[test]
    fn test_category_spike_week() {
        let values = weeks_of(&[10.0, 10.0, 10.0, 10.0, 100.0]);
        let series = PreparedSeries::new(Period::Daily, date(2024, 1, 1), values);
        let records = CategorySpikeDetector::default()
            .detect(&ScanTarget::new("u1", &series).for_category("food"))
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.date, date(2024, 1, 29));
        assert_eq!(record.observed_value, 700.0);
        assert_eq!(record.expected_range, (0.0, 140.0));
        assert_eq!(record.severity, Severity::High);
        assert_eq!(
            record.kind,
            AnomalyKind::CategorySpike {
                category_id: "food".to_string()
            }
        );
    }

    #[test]
    fn test_category_spike_severity_by_ratio() {
        let detector = CategorySpikeDetector::default();
        assert_eq!(detector.severity(2.5), Severity::Low);
        assert_eq!(detector.severity(3.2), Severity::Medium);
        assert_eq!(detector.severity(4.0), Severity::High);
    }

    #[test]
    fn test_partial_leading_week_is_not_a_baseline() {
        // Sunday, then four full weeks
        let mut values = vec![10.0];
        values.extend(weeks_of(&[10.0, 10.0, 10.0, 10.0]));
        let series = PreparedSeries::new(Period::Daily, date(2023, 12, 31), values);
        let config = AnomalyConfig {
            spike_trailing_weeks: 1,
            ..AnomalyConfig::default()
        };
        let records = CategorySpikeDetector::new(config)
            .detect(&ScanTarget::new("u1", &series).for_category("food"))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_category_spike_requires_category() {
        let series = PreparedSeries::new(Period::Daily, date(2024, 1, 1), vec![1.0; 28]);
        let err = CategorySpikeDetector::default()
            .detect(&ScanTarget::new("u1", &series))
            .unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidParameter { .. }));
    }
}
