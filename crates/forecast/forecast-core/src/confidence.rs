//! Confidence interval helpers
//!
//! Residual spread and horizon-scaled bands used by the forecasters.

use crate::stats::mean;

/// Get z-score for a given confidence level
pub fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96, // default to 95%
    }
}

/// Standard deviation of in-sample residuals.
///
/// `dof_loss` is the number of fitted parameters; the denominator is
/// `n - dof_loss`, falling back to `n` when that would not be positive.
pub fn residual_std(residuals: &[f64], dof_loss: usize) -> f64 {
    let n = residuals.len();
    if n == 0 {
        return 0.0;
    }
    let m = mean(residuals);
    let ss: f64 = residuals.iter().map(|r| (r - m).powi(2)).sum();
    let denominator = if n > dof_loss { n - dof_loss } else { n };
    (ss / denominator as f64).sqrt()
}

/// Half-widths that grow with the square root of the step:
/// `z * sigma * sqrt(h + 1)` for step `h`.
pub fn horizon_band(sigma: f64, horizon: usize, confidence_level: f64) -> Vec<f64> {
    let z = z_score(confidence_level);
    (0..horizon)
        .map(|h| z * sigma * ((h + 1) as f64).sqrt())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_scores() {
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.9), 1.645);
        assert_eq!(z_score(0.5), 1.96);
    }

    #[test]
    fn test_residual_std_uses_degrees_of_freedom() {
        let residuals = vec![-1.0, 1.0, -1.0, 1.0];
        assert!((residual_std(&residuals, 0) - 1.0).abs() < 1e-12);
        assert!((residual_std(&residuals, 2) - 2.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(residual_std(&[], 2), 0.0);
    }

    #[test]
    fn test_band_widens_with_horizon() {
        let band = horizon_band(2.0, 3, 0.95);
        assert_eq!(band.len(), 3);
        assert!((band[0] - 1.96 * 2.0).abs() < 1e-12);
        assert!(band[2] > band[1] && band[1] > band[0]);
    }
}
