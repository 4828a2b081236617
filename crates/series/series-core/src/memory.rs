//! In-memory ledger and category collaborators.
//!
//! Used by the server when it runs from a fixture file and by tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use series_spi::{
    CategoryService, LedgerEntry, Result, SeriesError, TransactionKind, TransactionLedgerReader,
};
use tokio::sync::RwLock;

/// Ledger backed by a vector of entries.
#[derive(Debug)]
pub struct InMemoryLedger {
    entries: RwLock<Vec<LedgerEntry>>,
    available: AtomicBool,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::from_entries(Vec::new())
    }
}

impl InMemoryLedger {
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            available: AtomicBool::new(true),
        }
    }

    pub async fn push(&self, entry: LedgerEntry) {
        self.entries.write().await.push(entry);
    }

    pub async fn extend(&self, entries: impl IntoIterator<Item = LedgerEntry>) {
        self.entries.write().await.extend(entries);
    }

    /// Simulate an outage: while unavailable every read fails with
    /// [`SeriesError::Ledger`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SeriesError::Ledger("in-memory ledger marked unavailable".to_string()))
        }
    }
}

#[async_trait]
impl TransactionLedgerReader for InMemoryLedger {
    async fn get_daily_series(
        &self,
        user_id: &str,
        kind: TransactionKind,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        self.check_available()?;
        let entries = self.entries.read().await;
        let mut series: Vec<(NaiveDate, f64)> = entries
            .iter()
            .filter(|e| e.user_id == user_id && e.kind == kind)
            .filter(|e| e.date >= start && e.date <= end)
            .filter(|e| match category_id {
                Some(id) => e.category_id.as_deref() == Some(id),
                None => true,
            })
            .map(|e| (e.date, e.amount))
            .collect();
        series.sort_by_key(|(date, _)| *date);
        Ok(series)
    }

    async fn current_balance(&self, user_id: &str) -> Result<f64> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| match e.kind {
                TransactionKind::Income => e.amount,
                TransactionKind::Expense => -e.amount,
            })
            .sum())
    }

    async fn expense_categories(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<String>> {
        self.check_available()?;
        let entries = self.entries.read().await;
        let categories: BTreeSet<String> = entries
            .iter()
            .filter(|e| e.user_id == user_id && e.kind == TransactionKind::Expense)
            .filter(|e| e.date >= start && e.date <= end)
            .filter_map(|e| e.category_id.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }
}

/// Category ownership table: category id -> owning user id.
#[derive(Debug, Default)]
pub struct InMemoryCategories {
    owners: RwLock<HashMap<String, String>>,
}

impl InMemoryCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive ownership from the categories referenced by ledger entries.
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let owners = entries
            .iter()
            .filter_map(|e| e.category_id.clone().map(|c| (c, e.user_id.clone())))
            .collect();
        Self {
            owners: RwLock::new(owners),
        }
    }

    pub async fn insert(&self, category_id: impl Into<String>, user_id: impl Into<String>) {
        self.owners
            .write()
            .await
            .insert(category_id.into(), user_id.into());
    }
}

#[async_trait]
impl CategoryService for InMemoryCategories {
    async fn exists_and_owned(&self, category_id: &str, user_id: &str) -> Result<bool> {
        let owners = self.owners.read().await;
        Ok(owners.get(category_id).map(|owner| owner == user_id).unwrap_or(false))
    }
}
