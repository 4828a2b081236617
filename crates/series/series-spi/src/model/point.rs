//! Resampled observation type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One resampled observation: the total for the bucket starting at `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}
