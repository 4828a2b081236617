//! Forecast model trait

use crate::error::Result;
use crate::model::{Algorithm, ForecastOutput};

/// Uniform contract over every forecasting variant.
///
/// Models are stateless: each call fits a fresh model over `series` and
/// forecasts `horizon` steps past its end. One instance can serve any number
/// of concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use forecast_spi::ForecastModel;
///
/// fn next_week(model: &dyn ForecastModel, daily: &[f64]) -> forecast_spi::Result<Vec<f64>> {
///     Ok(model.fit_predict(daily, 7, false)?.values)
/// }
/// ```
pub trait ForecastModel: Send + Sync {
    /// Which variant this is
    fn algorithm(&self) -> Algorithm;

    /// Fit `series` and forecast `horizon` steps.
    ///
    /// The output has exactly `horizon` values. When `want_intervals` is set
    /// it also carries lower and upper bounds that bracket every value.
    ///
    /// # Errors
    ///
    /// `ModelFit` on non-finite input or degenerate series,
    /// `InsufficientData` when the series is too short for the variant and
    /// `InvalidParameter` for a zero horizon.
    fn fit_predict(
        &self,
        series: &[f64],
        horizon: usize,
        want_intervals: bool,
    ) -> Result<ForecastOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    /// Mock implementation: repeats the last observation
    struct NaiveLast;

    impl ForecastModel for NaiveLast {
        fn algorithm(&self) -> Algorithm {
            Algorithm::MovingAverage
        }

        fn fit_predict(
            &self,
            series: &[f64],
            horizon: usize,
            want_intervals: bool,
        ) -> Result<ForecastOutput> {
            let last = *series.last().ok_or(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            })?;
            let values = vec![last; horizon];
            if want_intervals {
                Ok(ForecastOutput::with_band(values, &vec![1.0; horizon]))
            } else {
                Ok(ForecastOutput::point(values))
            }
        }
    }

    #[test]
    fn test_trait_object_dispatch() {
        let model: Box<dyn ForecastModel> = Box::new(NaiveLast);
        let output = model.fit_predict(&[1.0, 2.0, 3.0], 4, true).unwrap();
        assert_eq!(output.values, vec![3.0; 4]);
        assert!(output.has_intervals());
        assert_eq!(model.algorithm(), Algorithm::MovingAverage);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let err = NaiveLast.fit_predict(&[], 2, false).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { .. }));
    }

    #[test]
    fn test_models_are_shareable() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ForecastModel>();
    }
}
