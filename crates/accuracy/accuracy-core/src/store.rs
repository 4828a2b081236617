//! In-memory prediction store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use accuracy_spi::{
    AccuracyRecord, ModelPerformance, PerformanceKey, PredictionStore, StoreError, StoreResult,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use forecast_spi::Algorithm;
use prediction_spi::{PredictionResult, PredictionType};
use tokio::sync::RwLock;
use uuid::Uuid;

/// [`PredictionStore`] backed by hash maps behind async locks.
///
/// Performance rows live in one map with a single authoritative entry per
/// key; the compare-and-swap holds the write lock across compare and insert.
#[derive(Debug)]
pub struct InMemoryPredictionStore {
    results: RwLock<HashMap<Uuid, PredictionResult>>,
    accuracy: RwLock<HashMap<(Uuid, NaiveDate), AccuracyRecord>>,
    performance: RwLock<HashMap<PerformanceKey, ModelPerformance>>,
    available: AtomicBool,
}

impl Default for InMemoryPredictionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self {
            results: RwLock::new(HashMap::new()),
            accuracy: RwLock::new(HashMap::new()),
            performance: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage: while unavailable every call fails with
    /// [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn result_count(&self) -> usize {
        self.results.read().await.len()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl PredictionStore for InMemoryPredictionStore {
    async fn save_result(&self, result: PredictionResult) -> StoreResult<()> {
        self.check_available()?;
        self.results.write().await.insert(result.id, result);
        Ok(())
    }

    async fn get_result(&self, id: Uuid) -> StoreResult<Option<PredictionResult>> {
        self.check_available()?;
        Ok(self.results.read().await.get(&id).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<usize> {
        self.check_available()?;
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|_, result| !result.is_expired(now));
        Ok(before - results.len())
    }

    async fn upsert_accuracy(&self, record: AccuracyRecord) -> StoreResult<()> {
        self.check_available()?;
        self.accuracy
            .write()
            .await
            .insert((record.prediction_id, record.point_date), record);
        Ok(())
    }

    async fn accuracy_for_key(&self, key: PerformanceKey) -> StoreResult<Vec<AccuracyRecord>> {
        self.check_available()?;
        Ok(self
            .accuracy
            .read()
            .await
            .values()
            .filter(|record| record.key() == key)
            .cloned()
            .collect())
    }

    async fn list_accuracy(
        &self,
        prediction_id: Option<Uuid>,
        limit: usize,
    ) -> StoreResult<Vec<AccuracyRecord>> {
        self.check_available()?;
        let accuracy = self.accuracy.read().await;
        let mut records: Vec<AccuracyRecord> = accuracy
            .values()
            .filter(|record| prediction_id.map_or(true, |id| record.prediction_id == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.reported_at
                .cmp(&a.reported_at)
                .then_with(|| b.point_date.cmp(&a.point_date))
        });
        records.truncate(limit);
        Ok(records)
    }

    async fn get_performance(&self, key: PerformanceKey) -> StoreResult<Option<ModelPerformance>> {
        self.check_available()?;
        Ok(self.performance.read().await.get(&key).cloned())
    }

    async fn compare_and_swap_performance(
        &self,
        expected_version: Option<u64>,
        next: ModelPerformance,
    ) -> StoreResult<bool> {
        self.check_available()?;
        let mut performance = self.performance.write().await;
        let current = performance.get(&next.key()).map(|row| row.version);
        if current != expected_version {
            return Ok(false);
        }
        performance.insert(next.key(), next);
        Ok(true)
    }

    async fn list_performance(
        &self,
        algorithm: Option<Algorithm>,
        prediction_type: Option<PredictionType>,
    ) -> StoreResult<Vec<ModelPerformance>> {
        self.check_available()?;
        let performance = self.performance.read().await;
        let mut rows: Vec<ModelPerformance> = performance
            .values()
            .filter(|row| algorithm.map_or(true, |a| row.algorithm == a))
            .filter(|row| prediction_type.map_or(true, |t| row.prediction_type == t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.algorithm
                .as_str()
                .cmp(b.algorithm.as_str())
                .then_with(|| a.prediction_type.as_str().cmp(b.prediction_type.as_str()))
        });
        Ok(rows)
    }
}
