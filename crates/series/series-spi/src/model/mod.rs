//! Data models for transaction series.

mod entry;
mod period;
mod point;
mod series;

pub use entry::{LedgerEntry, SeriesQuery, TransactionKind};
pub use period::Period;
pub use point::TimeSeriesPoint;
pub use series::PreparedSeries;
