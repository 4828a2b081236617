//! Selectable forecasting variants.

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// The forecasting variants a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Trend plus weekly (and optionally broader) seasonal components
    Seasonal,
    /// Ordinary least squares on `(t, value)`
    Linear,
    /// Trailing k-day average extrapolated flat
    MovingAverage,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Seasonal,
        Algorithm::Linear,
        Algorithm::MovingAverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Seasonal => "seasonal",
            Algorithm::Linear => "linear",
            Algorithm::MovingAverage => "moving_average",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ForecastError::UnsupportedAlgorithm(s.to_string()))
    }
}
