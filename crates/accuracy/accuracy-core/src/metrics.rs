//! Forecast accuracy metrics
//!
//! The single accuracy formula used across the workspace. Per point, with
//! `e = actual - predicted`:
//!
//! - `absolute_error = |e|`
//! - `percentage_error = |e| / max(|actual|, epsilon)`
//!
//! Per aggregate: `mae = mean(|e|)`, `rmse = sqrt(mean(e^2))`,
//! `r2 = 1 - SS_res / SS_tot` and `accuracy_score = clamp(1 - mean(pct), 0, 1)`.

use accuracy_spi::AccuracyRecord;

const SS_TOLERANCE: f64 = 1e-10;

/// `(absolute_error, percentage_error)` for one point.
pub fn point_errors(actual: f64, predicted: f64, epsilon: f64) -> (f64, f64) {
    let absolute = (actual - predicted).abs();
    (absolute, absolute / actual.abs().max(epsilon))
}

/// Mean Absolute Error (MAE)
///
/// Average of absolute differences between predictions and actual values.
/// `NaN` for mismatched or empty input.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
///
/// Square root of the mean squared difference. Same scale as the data.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    (sum / actual.len() as f64).sqrt()
}

/// R-squared (Coefficient of Determination)
///
/// 1.0 = perfect, 0.0 = same as mean prediction, negative = worse than mean.
/// When the actual values have no variance the ratio is undefined: a perfect
/// forecast scores 1.0 and anything else 0.0.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;

    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot < SS_TOLERANCE {
        return if ss_res < SS_TOLERANCE { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

/// Aggregate metrics over the reported records of one performance key.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    pub accuracy_score: f64,
    pub sample_count: u64,
}

impl PerformanceSummary {
    /// Records without an actual value are ignored. `None` when no record has one.
    pub fn compute(records: &[AccuracyRecord], epsilon: f64) -> Option<Self> {
        let (actual, predicted): (Vec<f64>, Vec<f64>) =
            records.iter().filter_map(AccuracyRecord::pair).unzip();
        if actual.is_empty() {
            return None;
        }

        let mean_pct = actual
            .iter()
            .zip(predicted.iter())
            .map(|(&a, &p)| point_errors(a, p, epsilon).1)
            .sum::<f64>()
            / actual.len() as f64;

        Some(Self {
            mae: mae(&actual, &predicted),
            rmse: rmse(&actual, &predicted),
            r2: r_squared(&actual, &predicted),
            accuracy_score: (1.0 - mean_pct).clamp(0.0, 1.0),
            sample_count: actual.len() as u64,
        })
    }
}
