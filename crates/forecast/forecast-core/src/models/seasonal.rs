//! Seasonal decomposition forecaster

use forecast_spi::{Algorithm, Decomposer, ForecastModel, ForecastOutput, Result, SeasonalityDetector};

use crate::confidence::{horizon_band, residual_std};
use crate::decomposition::AdditiveDecomposer;
use crate::seasonality::AutocorrelationDetector;
use crate::stats::{check_input, ols};

/// Trend plus seasonal components, extrapolated step by step.
///
/// Fitting:
/// 1. Additive decomposition with the primary season gives a centered
///    seasonal profile (skipped when the series holds fewer than two cycles).
/// 2. An OLS line through the deseasonalized series gives the trend.
/// 3. With a broad-season lag set, an autocorrelation search over the
///    residual (lags above the primary season) may add a second profile.
///
/// The band is `z * sigma * sqrt(h + 1)`, widening with the horizon.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposition {
    season: Option<usize>,
    broad_season_max_lag: Option<usize>,
    confidence_level: f64,
}

impl SeasonalDecomposition {
    pub fn new(season: Option<usize>, confidence_level: f64) -> Self {
        Self {
            season,
            broad_season_max_lag: None,
            confidence_level,
        }
    }

    /// Also search the residual for a cycle of up to `max_lag` observations.
    pub fn with_broad_season(mut self, max_lag: Option<usize>) -> Self {
        self.broad_season_max_lag = max_lag;
        self
    }

    fn broad_profile(&self, residuals: &[f64], primary: Option<usize>) -> Vec<f64> {
        let Some(max_lag) = self.broad_season_max_lag else {
            return Vec::new();
        };
        let min_lag = primary.map(|p| p + 1).unwrap_or(2);
        let detector = AutocorrelationDetector::new().with_min_lag(min_lag);
        match detector.detect(residuals, max_lag) {
            Some(cycle) => AdditiveDecomposer
                .decompose(residuals, cycle)
                .seasonal_profile(cycle),
            None => Vec::new(),
        }
    }
}

impl Default for SeasonalDecomposition {
    fn default() -> Self {
        Self::new(Some(7), super::DEFAULT_CONFIDENCE_LEVEL)
    }
}

fn profile_at(profile: &[f64], t: usize) -> f64 {
    if profile.is_empty() {
        0.0
    } else {
        profile[t % profile.len()]
    }
}

impl ForecastModel for SeasonalDecomposition {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Seasonal
    }

    fn fit_predict(
        &self,
        series: &[f64],
        horizon: usize,
        want_intervals: bool,
    ) -> Result<ForecastOutput> {
        check_input(series, horizon, 2)?;
        let n = series.len();

        let primary = self.season.filter(|&p| p >= 2 && n >= p * 2);
        let profile = primary
            .map(|p| AdditiveDecomposer.decompose(series, p).seasonal_profile(p))
            .unwrap_or_default();

        let deseasonalized: Vec<f64> = series
            .iter()
            .enumerate()
            .map(|(i, y)| y - profile_at(&profile, i))
            .collect();
        let line = ols(&deseasonalized)?;

        let mut residuals: Vec<f64> = deseasonalized
            .iter()
            .enumerate()
            .map(|(i, y)| y - line.at(i as f64))
            .collect();
        let broad = self.broad_profile(&residuals, primary);
        for (i, r) in residuals.iter_mut().enumerate() {
            *r -= profile_at(&broad, i);
        }

        let values: Vec<f64> = (n..n + horizon)
            .map(|t| line.at(t as f64) + profile_at(&profile, t) + profile_at(&broad, t))
            .collect();
        if !want_intervals {
            return Ok(ForecastOutput::point(values));
        }

        let sigma = residual_std(&residuals, 2);
        let band = horizon_band(sigma, horizon, self.confidence_level);
        Ok(ForecastOutput::with_band(values, &band))
    }
}
