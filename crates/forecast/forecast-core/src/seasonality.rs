//! Seasonality detection
//!
//! Autocorrelation-based search for the dominant cycle in a series. The
//! seasonal forecaster runs it over its residuals to find a broader cycle
//! (e.g. monthly spending on top of the weekly one).

use forecast_spi::SeasonalityDetector;

/// Default minimum autocorrelation for a lag to count as seasonal
pub const DEFAULT_ACF_THRESHOLD: f64 = 0.3;

/// Autocorrelation-based seasonality detector
#[derive(Debug, Clone, Copy)]
pub struct AutocorrelationDetector {
    /// Minimum autocorrelation threshold to consider significant
    threshold: f64,
    /// Smallest lag considered
    min_lag: usize,
}

impl AutocorrelationDetector {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_ACF_THRESHOLD,
            min_lag: 2,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::new()
        }
    }

    /// Ignore lags below `min_lag` (clamped to at least 2).
    pub fn with_min_lag(mut self, min_lag: usize) -> Self {
        self.min_lag = min_lag.max(2);
        self
    }
}

impl Default for AutocorrelationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonalityDetector for AutocorrelationDetector {
    fn detect(&self, data: &[f64], max_period: usize) -> Option<usize> {
        let n = data.len();
        if max_period < self.min_lag || n < max_period * 2 {
            return None;
        }

        let acf = autocorrelation(data, max_period);
        (self.min_lag..acf.len())
            .filter(|&lag| acf[lag] > self.threshold)
            .max_by(|&a, &b| acf[a].total_cmp(&acf[b]))
    }
}

/// Compute the autocorrelation function up to `max_lag` (inclusive).
///
/// A constant series has no defined autocorrelation and yields zeros past
/// lag 0.
pub fn autocorrelation(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    let mean: f64 = data.iter().sum::<f64>() / n as f64;
    let var: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();

    (0..=max_lag.min(n - 1))
        .map(|lag| {
            if lag == 0 {
                1.0
            } else if var == 0.0 {
                0.0
            } else {
                data.iter()
                    .take(n - lag)
                    .zip(data.iter().skip(lag))
                    .map(|(a, b)| (a - mean) * (b - mean))
                    .sum::<f64>()
                    / var
            }
        })
        .collect()
}
