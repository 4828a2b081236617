//! Dense resampled series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Period, TimeSeriesPoint};

/// A dense, gap-filled series: `values[i]` is the total of the `i`-th
/// bucket counted from `start` at the series' [`Period`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSeries {
    pub period: Period,
    pub start: NaiveDate,
    pub values: Vec<f64>,
}

impl PreparedSeries {
    pub fn new(period: Period, start: NaiveDate, values: Vec<f64>) -> Self {
        Self {
            period,
            start: period.bucket_start(start),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bucket start dates, one per value.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(self.values.len());
        let mut current = self.start;
        for _ in 0..self.values.len() {
            dates.push(current);
            current = self.period.next_start(current);
        }
        dates
    }

    pub fn points(&self) -> Vec<TimeSeriesPoint> {
        self.dates()
            .into_iter()
            .zip(self.values.iter())
            .map(|(date, &value)| TimeSeriesPoint::new(date, value))
            .collect()
    }

    /// Start date of the last bucket, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates().last().copied()
    }

    /// The `horizon` bucket start dates that follow the series.
    pub fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        let mut current = match self.last_date() {
            Some(last) => self.period.next_start(last),
            None => self.start,
        };
        let mut dates = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            dates.push(current);
            current = self.period.next_start(current);
        }
        dates
    }

    /// Count of buckets with a non-zero total.
    pub fn non_zero_count(&self) -> usize {
        self.values.iter().filter(|v| v.abs() > f64::EPSILON).count()
    }

    /// Trailing `n` values (all values when the series is shorter).
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.values[self.values.len().saturating_sub(n)..]
    }
}
