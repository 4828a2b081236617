//! Forecasting variants
//!
//! - [`SeasonalDecomposition`]: OLS trend on the deseasonalized series plus
//!   the primary seasonal profile and an optional broader cycle
//! - [`LinearTrend`]: OLS line on `(t, value)`
//! - [`MovingAverage`]: trailing mean extrapolated flat

mod linear;
mod moving_average;
mod seasonal;

pub use linear::LinearTrend;
pub use moving_average::MovingAverage;
pub use seasonal::SeasonalDecomposition;

use forecast_spi::{Algorithm, ForecastModel};
use serde::{Deserialize, Serialize};

/// Default trailing window for [`MovingAverage`]
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 7;

/// Default confidence level for interval bands
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Parameters shared by the variants; each reads only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Primary seasonal cycle in observations (7 for daily data)
    pub season: Option<usize>,
    /// When set, search the residual for a broader cycle up to this lag
    pub broad_season_max_lag: Option<usize>,
    /// Trailing window for the moving average
    pub moving_average_window: usize,
    /// Confidence level for the seasonal band
    pub confidence_level: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            season: Some(7),
            broad_season_max_lag: None,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

/// Build the model for `algorithm`.
pub fn model_for(algorithm: Algorithm, params: &ModelParams) -> Box<dyn ForecastModel> {
    match algorithm {
        Algorithm::Seasonal => Box::new(
            SeasonalDecomposition::new(params.season, params.confidence_level)
                .with_broad_season(params.broad_season_max_lag),
        ),
        Algorithm::Linear => Box::new(LinearTrend::new()),
        Algorithm::MovingAverage => Box::new(MovingAverage::new(params.moving_average_window)),
    }
}
