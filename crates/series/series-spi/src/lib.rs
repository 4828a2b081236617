//! Series Service Provider Interface
//!
//! Defines the ledger collaborators, the resampled series models and the
//! error type shared by everything that turns transactions into series.
//!
//! - [`TransactionLedgerReader`]: read access to a user's transaction ledger
//! - [`CategoryService`]: category ownership checks
//! - [`PreparedSeries`]: a dense, gap-filled series at a given [`Period`]
//! - [`SeriesError`]: standardized error type for series preparation

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CategoryService, TransactionLedgerReader};
pub use error::{Result, SeriesError};
pub use model::{
    LedgerEntry, Period, PreparedSeries, SeriesQuery, TimeSeriesPoint, TransactionKind,
};
