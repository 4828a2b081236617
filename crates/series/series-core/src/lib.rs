//! Series Core
//!
//! Turns sparse ledger events into dense series:
//!
//! - [`SeriesPreparer`]: reads the ledger and builds the gap-filled daily series
//! - [`densify`] / [`aggregate`]: the pure resampling steps
//! - [`InMemoryLedger`] / [`InMemoryCategories`]: collaborators backed by a `Vec`

mod memory;
mod preparer;

// Re-export SPI types for implementations
pub use series_spi::{
    CategoryService, LedgerEntry, Period, PreparedSeries, Result, SeriesError, SeriesQuery,
    TimeSeriesPoint, TransactionKind, TransactionLedgerReader,
};

pub use memory::{InMemoryCategories, InMemoryLedger};
pub use preparer::{aggregate, densify, SeriesPreparer, DEFAULT_MIN_NON_ZERO_DAYS};
