//! Trait for seasonality detection

/// Finds the dominant cycle length in a series
pub trait SeasonalityDetector: Send + Sync {
    /// Detect the dominant seasonality period in the data, searching lags up
    /// to `max_period`
    fn detect(&self, data: &[f64], max_period: usize) -> Option<usize>;
}
