//! Transaction ledger reader trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::model::TransactionKind;

/// Read-only view over a user's transaction ledger.
///
/// Implementations are backed by whatever store holds transactions. All
/// date ranges are inclusive on both ends.
#[async_trait]
pub trait TransactionLedgerReader: Send + Sync {
    /// Per-day totals for `(user_id, kind[, category_id])` between `start` and
    /// `end`, ordered by date. Days without transactions may be omitted and a
    /// date may appear more than once.
    async fn get_daily_series(
        &self,
        user_id: &str,
        kind: TransactionKind,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>>;

    /// Balance of the user's ledger as of now (all income minus all expense).
    async fn current_balance(&self, user_id: &str) -> Result<f64>;

    /// Category ids that carry at least one expense between `start` and `end`.
    async fn expense_categories(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<String>>;
}
