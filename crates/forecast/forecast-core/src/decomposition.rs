//! Time series decomposition
//!
//! Classical additive decomposition: a centered moving average gives the
//! trend, per-position means of the detrended series give the seasonal
//! component, and whatever is left is the residual.

use forecast_spi::{DecompositionResult, Decomposer};

/// Additive decomposition: Y = T + S + R
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveDecomposer;

impl AdditiveDecomposer {
    pub fn new() -> Self {
        Self
    }
}

impl Decomposer for AdditiveDecomposer {
    fn decompose(&self, data: &[f64], period: usize) -> DecompositionResult {
        decompose_additive(data, period)
    }
}

/// Perform additive decomposition.
///
/// Series shorter than two full cycles come back as pure trend. The seasonal
/// component is centered so one cycle sums to zero.
pub fn decompose_additive(data: &[f64], period: usize) -> DecompositionResult {
    let n = data.len();
    if period < 2 || n < period * 2 {
        return DecompositionResult {
            trend: data.to_vec(),
            seasonal: vec![0.0; n],
            residual: vec![0.0; n],
        };
    }

    let trend = centered_moving_average(data, period);

    // Detrend
    let detrended: Vec<f64> = data.iter().zip(trend.iter()).map(|(d, t)| d - t).collect();

    // Seasonal component (average by period position)
    let mut profile: Vec<f64> = (0..period)
        .map(|pos| {
            let values: Vec<f64> = detrended.iter().skip(pos).step_by(period).copied().collect();
            values.iter().sum::<f64>() / values.len() as f64
        })
        .collect();
    let offset = profile.iter().sum::<f64>() / period as f64;
    for s in &mut profile {
        *s -= offset;
    }
    let seasonal: Vec<f64> = (0..n).map(|i| profile[i % period]).collect();

    // Residual
    let residual: Vec<f64> = data
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((d, t), s)| d - t - s)
        .collect();

    DecompositionResult {
        trend,
        seasonal,
        residual,
    }
}

/// Centered moving average over one cycle.
///
/// Odd periods use a plain `period`-wide window; even periods use the
/// classical 2x`period` window with half weights at both ends. Edges where
/// the window does not fit repeat the nearest computed value.
pub fn centered_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let half = period / 2;
    if period == 0 || n < period + 1 {
        return data.to_vec();
    }

    let mut trend = vec![0.0; n];
    for i in half..(n - half) {
        trend[i] = if period % 2 == 1 {
            data[i - half..=i + half].iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = data[i - half + 1..i + half].iter().sum();
            (inner + 0.5 * (data[i - half] + data[i + half])) / period as f64
        };
    }
    // Extend trend at edges
    for i in 0..half {
        trend[i] = trend[half];
    }
    for i in (n - half)..n {
        trend[i] = trend[n - half - 1];
    }
    trend
}
