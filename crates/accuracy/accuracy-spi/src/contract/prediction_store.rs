//! Prediction store trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forecast_spi::Algorithm;
use prediction_spi::{PredictionResult, PredictionType};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{AccuracyRecord, ModelPerformance, PerformanceKey};

/// Persistence for results, accuracy records and performance aggregates.
///
/// Performance rows are only ever replaced whole through
/// [`PredictionStore::compare_and_swap_performance`]; there is no in-place
/// update.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn save_result(&self, result: PredictionResult) -> StoreResult<()>;

    /// The stored result, expired or not.
    async fn get_result(&self, id: Uuid) -> StoreResult<Option<PredictionResult>>;

    /// Remove results with `expires_at <= now`; returns how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<usize>;

    /// Insert or replace the record for `(prediction_id, point_date)`.
    async fn upsert_accuracy(&self, record: AccuracyRecord) -> StoreResult<()>;

    /// Every accuracy record for the key.
    async fn accuracy_for_key(&self, key: PerformanceKey) -> StoreResult<Vec<AccuracyRecord>>;

    /// Records, most recently reported first, at most `limit`.
    async fn list_accuracy(
        &self,
        prediction_id: Option<Uuid>,
        limit: usize,
    ) -> StoreResult<Vec<AccuracyRecord>>;

    async fn get_performance(&self, key: PerformanceKey) -> StoreResult<Option<ModelPerformance>>;

    /// Store `next` only if the current row's version is `expected_version`
    /// (`None`: no row yet). Returns whether the swap happened.
    async fn compare_and_swap_performance(
        &self,
        expected_version: Option<u64>,
        next: ModelPerformance,
    ) -> StoreResult<bool>;

    async fn list_performance(
        &self,
        algorithm: Option<Algorithm>,
        prediction_type: Option<PredictionType>,
    ) -> StoreResult<Vec<ModelPerformance>>;
}
