//! Ledger entry and query types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transaction as stored by the ledger.
///
/// The engine only sees entries through [`crate::TransactionLedgerReader`];
/// this type exists for in-memory ledgers and fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub user_id: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category_id: Option<String>,
    pub amount: f64,
}

impl LedgerEntry {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, kind: TransactionKind, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            kind,
            category_id: None,
            amount,
        }
    }

    /// Attach a category to the entry.
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

/// What to read from the ledger: `(user, kind[, category])` over an
/// inclusive date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub user_id: String,
    pub kind: TransactionKind,
    pub category_id: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeriesQuery {
    /// Query the `lookback_days` days ending at (and including) `end`.
    pub fn lookback(
        user_id: impl Into<String>,
        kind: TransactionKind,
        end: NaiveDate,
        lookback_days: u32,
    ) -> Self {
        let span = i64::from(lookback_days.max(1)) - 1;
        Self {
            user_id: user_id.into(),
            kind,
            category_id: None,
            start: end - chrono::Duration::days(span),
            end,
        }
    }

    /// Scope the query to one category.
    pub fn for_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Number of days covered by the window, zero when inverted.
    pub fn window_days(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lookback_window_is_inclusive() {
        let query = SeriesQuery::lookback("u1", TransactionKind::Expense, date(2024, 3, 31), 31);
        assert_eq!(query.start, date(2024, 3, 1));
        assert_eq!(query.window_days(), 31);
    }

    #[test]
    fn test_inverted_window_has_zero_days() {
        let mut query = SeriesQuery::lookback("u1", TransactionKind::Income, date(2024, 1, 10), 5);
        query.start = date(2024, 2, 1);
        assert_eq!(query.window_days(), 0);
    }

    #[test]
    fn test_entry_deserializes_without_category() {
        let json = r#"{"user_id":"u1","date":"2024-01-05","kind":"income","amount":1200.0}"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, TransactionKind::Income);
        assert!(entry.category_id.is_none());
    }
}
