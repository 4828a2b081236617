//! Small numeric helpers shared by the forecasters.

use forecast_spi::{ForecastError, Result};

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64).sqrt()
}

/// Sample standard deviation (`n - 1` denominator), `0.0` below two points.
pub fn sample_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64).sqrt()
}

/// Least squares line through `(i, data[i])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}

/// Ordinary least squares on the time index.
pub fn ols(data: &[f64]) -> Result<LineFit> {
    if data.len() < 2 {
        return Err(ForecastError::InsufficientData {
            required: 2,
            actual: data.len(),
        });
    }

    let n = data.len() as f64;
    let sum_t: f64 = (0..data.len()).map(|i| i as f64).sum();
    let sum_y: f64 = data.iter().sum();
    let sum_t2: f64 = (0..data.len()).map(|i| (i * i) as f64).sum();
    let sum_ty: f64 = data.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();

    let denominator = n * sum_t2 - sum_t * sum_t;
    if denominator.abs() < 1e-10 {
        return Err(ForecastError::ModelFit(
            "singular design matrix in least squares".to_string(),
        ));
    }

    let slope = (n * sum_ty - sum_t * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_t) / n;
    Ok(LineFit { intercept, slope })
}

/// Reject empty, non-finite or zero-horizon input.
pub fn check_input(series: &[f64], horizon: usize, required: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::invalid_parameter("horizon", "must be at least 1"));
    }
    if series.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: series.len(),
        });
    }
    if series.iter().any(|x| !x.is_finite()) {
        return Err(ForecastError::ModelFit(
            "series contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ols_recovers_line() {
        let data: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = ols(&data).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 3.0).abs() < 1e-10);
        assert!((fit.at(10.0) - 23.0).abs() < 1e-10);
    }

    #[test]
    fn test_ols_needs_two_points() {
        assert!(matches!(
            ols(&[1.0]),
            Err(ForecastError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_std_devs() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&data) - 2.0).abs() < 1e-10);
        assert!((sample_std_dev(&data) - (32.0f64 / 7.0).sqrt()).abs() < 1e-10);
        assert_eq!(sample_std_dev(&[1.0]), 0.0);
    }

    #[test]
    fn test_check_input() {
        assert!(check_input(&[1.0, 2.0], 1, 2).is_ok());
        assert!(matches!(
            check_input(&[1.0, f64::NAN], 1, 2),
            Err(ForecastError::ModelFit(_))
        ));
        assert!(matches!(
            check_input(&[1.0, 2.0], 0, 2),
            Err(ForecastError::InvalidParameter { .. })
        ));
        assert!(matches!(
            check_input(&[], 3, 1),
            Err(ForecastError::InsufficientData { .. })
        ));
    }
}
