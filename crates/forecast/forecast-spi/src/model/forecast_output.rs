//! Forecast output model

use serde::{Deserialize, Serialize};

/// Point forecast for a horizon, with bounds when intervals were requested.
///
/// When present, `lower` and `upper` have the same length as `values` and
/// satisfy `lower[i] <= values[i] <= upper[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutput {
    /// Point forecast
    pub values: Vec<f64>,
    /// Lower bound of the prediction interval
    pub lower: Option<Vec<f64>>,
    /// Upper bound of the prediction interval
    pub upper: Option<Vec<f64>>,
}

impl ForecastOutput {
    /// Point forecast without bounds
    pub fn point(values: Vec<f64>) -> Self {
        Self {
            values,
            lower: None,
            upper: None,
        }
    }

    /// Symmetric band of `half_widths[i]` around each value. Negative widths
    /// are treated as zero.
    pub fn with_band(values: Vec<f64>, half_widths: &[f64]) -> Self {
        let width = |i: usize| half_widths.get(i).copied().unwrap_or(0.0).max(0.0);
        let lower = values.iter().enumerate().map(|(i, v)| v - width(i)).collect();
        let upper = values.iter().enumerate().map(|(i, v)| v + width(i)).collect();
        Self {
            values,
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// Number of forecast steps
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Floor values and lower bounds at zero, raising the upper bound where
    /// needed so bounds still bracket the value.
    pub fn clamp_non_negative(mut self) -> Self {
        for v in &mut self.values {
            *v = v.max(0.0);
        }
        if let Some(lower) = self.lower.as_mut() {
            for l in lower.iter_mut() {
                *l = l.max(0.0);
            }
        }
        if let Some(upper) = self.upper.as_mut() {
            for (u, v) in upper.iter_mut().zip(self.values.iter()) {
                *u = u.max(*v);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_brackets_values() {
        let output = ForecastOutput::with_band(vec![10.0, 20.0], &[1.0, 2.0]);
        assert_eq!(output.lower, Some(vec![9.0, 18.0]));
        assert_eq!(output.upper, Some(vec![11.0, 22.0]));
        assert!(output.has_intervals());
    }

    #[test]
    fn test_band_ignores_negative_width() {
        let output = ForecastOutput::with_band(vec![5.0], &[-3.0]);
        assert_eq!(output.lower, Some(vec![5.0]));
        assert_eq!(output.upper, Some(vec![5.0]));
    }

    #[test]
    fn test_point_has_no_intervals() {
        let output = ForecastOutput::point(vec![1.0, 2.0, 3.0]);
        assert_eq!(output.horizon(), 3);
        assert!(!output.has_intervals());
    }

    #[test]
    fn test_clamp_non_negative_keeps_ordering() {
        let output = ForecastOutput {
            values: vec![-5.0, 3.0],
            lower: Some(vec![-9.0, 1.0]),
            upper: Some(vec![-1.0, 6.0]),
        }
        .clamp_non_negative();

        assert_eq!(output.values, vec![0.0, 3.0]);
        assert_eq!(output.lower, Some(vec![0.0, 1.0]));
        assert_eq!(output.upper, Some(vec![0.0, 6.0]));
    }
}
