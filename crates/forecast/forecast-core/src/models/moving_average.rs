//! Trailing moving average forecaster

use forecast_spi::{Algorithm, ForecastModel, ForecastOutput, Result};

use crate::stats::{check_input, mean, sample_std_dev};

/// Mean of the trailing `window` observations, extrapolated flat.
///
/// Series shorter than the window average what they have. The band is
/// `± sample standard deviation` of the same trailing window.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    /// Create a forecaster averaging the last `window` observations (at least 1).
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Get window size
    pub fn window_size(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(super::DEFAULT_MOVING_AVERAGE_WINDOW)
    }
}

impl ForecastModel for MovingAverage {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MovingAverage
    }

    fn fit_predict(
        &self,
        series: &[f64],
        horizon: usize,
        want_intervals: bool,
    ) -> Result<ForecastOutput> {
        check_input(series, horizon, 1)?;
        let k = self.window.min(series.len());
        let trailing = &series[series.len() - k..];

        let values = vec![mean(trailing); horizon];
        if want_intervals {
            let spread = sample_std_dev(trailing);
            Ok(ForecastOutput::with_band(values, &vec![spread; horizon]))
        } else {
            Ok(ForecastOutput::point(values))
        }
    }
}
