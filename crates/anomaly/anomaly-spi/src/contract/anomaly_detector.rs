//! Anomaly detector trait definition.

use series_spi::PreparedSeries;

use crate::error::Result;
use crate::model::AnomalyRecord;

/// The series a detector scans and whom it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ScanTarget<'a> {
    pub user_id: &'a str,
    /// Set when `series` is scoped to one category
    pub category_id: Option<&'a str>,
    pub series: &'a PreparedSeries,
}

impl<'a> ScanTarget<'a> {
    pub fn new(user_id: &'a str, series: &'a PreparedSeries) -> Self {
        Self {
            user_id,
            category_id: None,
            series,
        }
    }

    pub fn for_category(mut self, category_id: &'a str) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Anomaly detector trait.
///
/// Detectors are stateless: every call is a read-only computation over the
/// target series and nothing is persisted.
pub trait AnomalyDetector: Send + Sync {
    /// Flag the unusual observations of `target`, ordered by date.
    fn detect(&self, target: &ScanTarget<'_>) -> Result<Vec<AnomalyRecord>>;
}
