//! Ledger-to-series preparation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use series_spi::{
    Period, PreparedSeries, Result, SeriesError, SeriesQuery, TransactionLedgerReader,
};
use tracing::debug;

/// Fewest distinct non-zero days a window must contain to be forecastable.
pub const DEFAULT_MIN_NON_ZERO_DAYS: usize = 10;

/// Buckets a model needs at minimum after aggregation.
const MIN_BUCKETS: usize = 2;

/// Reads ledger events and converts them into a dense daily series.
///
/// The preparer owns no state besides its collaborator handle, so one
/// instance serves concurrent requests.
#[derive(Clone)]
pub struct SeriesPreparer {
    ledger: Arc<dyn TransactionLedgerReader>,
    min_non_zero_days: usize,
}

impl SeriesPreparer {
    pub fn new(ledger: Arc<dyn TransactionLedgerReader>) -> Self {
        Self {
            ledger,
            min_non_zero_days: DEFAULT_MIN_NON_ZERO_DAYS,
        }
    }

    pub fn with_min_non_zero_days(mut self, min_non_zero_days: usize) -> Self {
        self.min_non_zero_days = min_non_zero_days;
        self
    }

    pub fn ledger(&self) -> &Arc<dyn TransactionLedgerReader> {
        &self.ledger
    }

    /// Read `query` from the ledger and return the daily series covering the
    /// whole window, one value per day.
    ///
    /// # Errors
    ///
    /// [`SeriesError::InsufficientData`] when fewer than the configured number
    /// of distinct days carry a non-zero total, [`SeriesError::Ledger`] when
    /// the ledger cannot be read.
    pub async fn prepare(&self, query: &SeriesQuery) -> Result<PreparedSeries> {
        let events = self
            .ledger
            .get_daily_series(
                &query.user_id,
                query.kind,
                query.category_id.as_deref(),
                query.start,
                query.end,
            )
            .await?;

        let series = densify(&events, query.start, query.end)?;
        let non_zero = series.non_zero_count();
        debug!(
            user_id = %query.user_id,
            kind = %query.kind,
            category_id = ?query.category_id,
            days = series.len(),
            non_zero,
            "prepared daily series"
        );

        if non_zero < self.min_non_zero_days {
            return Err(SeriesError::InsufficientData {
                required: self.min_non_zero_days,
                actual: non_zero,
            });
        }
        Ok(series)
    }

    /// Prepare the daily series and aggregate it to `period`.
    pub async fn prepare_at(&self, query: &SeriesQuery, period: Period) -> Result<PreparedSeries> {
        let daily = self.prepare(query).await?;
        aggregate(&daily, period)
    }
}

/// Build the dense daily series for `[start, end]` from `(date, amount)`
/// events.
///
/// Missing days become `0.0`, amounts sharing a day are summed and events
/// outside the window or with non-finite amounts are ignored.
pub fn densify(events: &[(NaiveDate, f64)], start: NaiveDate, end: NaiveDate) -> Result<PreparedSeries> {
    if end < start {
        return Err(SeriesError::InvalidWindow(format!(
            "end {} is before start {}",
            end, start
        )));
    }

    let days = (end - start).num_days() as usize + 1;
    let mut values = vec![0.0; days];
    for &(date, amount) in events {
        if date < start || date > end || !amount.is_finite() {
            continue;
        }
        values[(date - start).num_days() as usize] += amount;
    }

    Ok(PreparedSeries::new(Period::Daily, start, values))
}

/// Sum a daily series into complete `period` buckets.
///
/// A leading bucket that starts before the series and a trailing bucket that
/// is still in progress are dropped, so every returned value covers a whole
/// calendar bucket. Daily input at `Period::Daily` is returned unchanged.
pub fn aggregate(daily: &PreparedSeries, period: Period) -> Result<PreparedSeries> {
    if period == Period::Daily {
        return Ok(daily.clone());
    }

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in daily.points() {
        *buckets.entry(period.bucket_start(point.date)).or_insert(0.0) += point.value;
    }

    let first_day = daily.start;
    let last_day = daily.start + Duration::days(daily.len() as i64 - 1);

    if period.bucket_start(first_day) != first_day {
        buckets.remove(&period.bucket_start(first_day));
    }
    if period.next_start(last_day) != last_day + Duration::days(1) {
        buckets.remove(&period.bucket_start(last_day));
    }

    if buckets.len() < MIN_BUCKETS {
        return Err(SeriesError::InsufficientData {
            required: MIN_BUCKETS,
            actual: buckets.len(),
        });
    }

    let start = *buckets.keys().next().unwrap_or(&first_day);
    Ok(PreparedSeries::new(period, start, buckets.into_values().collect()))
}
