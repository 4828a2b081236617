//! Linear trend forecaster

use forecast_spi::{Algorithm, ForecastModel, ForecastOutput, Result};

use crate::confidence::residual_std;
use crate::stats::{check_input, ols};

/// Ordinary least squares on `(t, value)`, extrapolated along the line.
///
/// The band is a constant `± sigma` where `sigma` is the residual standard
/// deviation with `n - 2` degrees of freedom.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrend;

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastModel for LinearTrend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Linear
    }

    fn fit_predict(
        &self,
        series: &[f64],
        horizon: usize,
        want_intervals: bool,
    ) -> Result<ForecastOutput> {
        check_input(series, horizon, 2)?;
        let line = ols(series)?;
        let n = series.len();

        let values: Vec<f64> = (n..n + horizon).map(|t| line.at(t as f64)).collect();
        if !want_intervals {
            return Ok(ForecastOutput::point(values));
        }

        let residuals: Vec<f64> = series
            .iter()
            .enumerate()
            .map(|(i, y)| y - line.at(i as f64))
            .collect();
        let sigma = residual_std(&residuals, 2);
        Ok(ForecastOutput::with_band(values, &vec![sigma; horizon]))
    }
}
