//! Accuracy tracker
//!
//! Stores forecasts, reconciles actual values against them and recomputes
//! the performance row of the forecast's `(algorithm, prediction_type)`.

use std::sync::Arc;

use accuracy_spi::{
    AccuracyConfig, AccuracyError, AccuracyRecord, AccuracyReport, ModelPerformance,
    PerformanceKey, PredictionStore, Result,
};
use chrono::{DateTime, Utc};
use forecast_spi::Algorithm;
use prediction_spi::{PredictionResult, PredictionType};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::metrics::{point_errors, PerformanceSummary};

/// Reconciles reported actual values with stored forecasts.
///
/// Performance rows are recomputed from every accuracy record of their key
/// and written with compare-and-swap, retrying when another report for the
/// same key got there first. Nothing is accumulated incrementally, so a
/// re-report of the same point replaces its record instead of counting twice.
#[derive(Clone)]
pub struct AccuracyTracker {
    store: Arc<dyn PredictionStore>,
    config: AccuracyConfig,
}

impl AccuracyTracker {
    pub fn new(store: Arc<dyn PredictionStore>, config: AccuracyConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AccuracyConfig {
        &self.config
    }

    /// Persist a result; it stays reportable until `expires_at`.
    pub async fn record_prediction(&self, result: &PredictionResult) -> Result<()> {
        self.store.save_result(result.clone()).await?;
        info!(
            prediction_id = %result.id,
            prediction_type = %result.request.prediction_type,
            algorithm = %result.algorithm,
            expires_at = %result.expires_at,
            "prediction recorded"
        );
        Ok(())
    }

    pub async fn report_actual(&self, report: &AccuracyReport) -> Result<AccuracyRecord> {
        self.report_actual_at(report, Utc::now()).await
    }

    /// Reconcile `report` as of `now`.
    ///
    /// The report matches the point whose bucket, at the request's period,
    /// contains `observation_date`. The record for that point is upserted and
    /// the performance row recomputed.
    pub async fn report_actual_at(
        &self,
        report: &AccuracyReport,
        now: DateTime<Utc>,
    ) -> Result<AccuracyRecord> {
        if !report.actual_value.is_finite() {
            return Err(AccuracyError::Validation(
                "actual_value must be a finite number".to_string(),
            ));
        }
        if report.observation_date > now.date_naive() {
            return Err(AccuracyError::Validation(format!(
                "observation_date {} is in the future",
                report.observation_date
            )));
        }

        let result = self
            .store
            .get_result(report.prediction_id)
            .await?
            .filter(|result| !result.is_expired(now))
            .ok_or(AccuracyError::PredictionNotFound(report.prediction_id))?;

        let prediction_type = result.request.prediction_type;
        if prediction_type.is_non_negative() && report.actual_value < 0.0 {
            return Err(AccuracyError::Validation(format!(
                "actual_value for {} must not be negative",
                prediction_type
            )));
        }

        let point = result
            .point_for(report.observation_date)
            .ok_or(AccuracyError::PointNotFound {
                id: result.id,
                date: report.observation_date,
            })?;

        let (absolute_error, percentage_error) =
            point_errors(report.actual_value, point.predicted_value, self.config.epsilon);
        let record = AccuracyRecord {
            prediction_id: result.id,
            point_date: point.date,
            algorithm: result.algorithm,
            prediction_type,
            predicted_value: point.predicted_value,
            actual_value: Some(report.actual_value),
            absolute_error: Some(absolute_error),
            percentage_error: Some(percentage_error),
            reported_at: Some(now),
        };
        self.store.upsert_accuracy(record.clone()).await?;
        info!(
            prediction_id = %record.prediction_id,
            point_date = %record.point_date,
            absolute_error,
            "actual value reported"
        );

        self.recompute(record.key(), now).await?;
        Ok(record)
    }

    /// Rebuild the performance row for `key` from all of its records.
    ///
    /// The current row is read before the records, so a swap that succeeds
    /// always reflects every record upserted before it.
    pub async fn recompute(
        &self,
        key: PerformanceKey,
        now: DateTime<Utc>,
    ) -> Result<Option<ModelPerformance>> {
        for attempt in 1..=self.config.max_cas_retries {
            let previous = self.store.get_performance(key).await?;
            let records = self.store.accuracy_for_key(key).await?;
            let Some(summary) = PerformanceSummary::compute(&records, self.config.epsilon) else {
                return Ok(previous);
            };

            let next = ModelPerformance {
                algorithm: key.algorithm,
                prediction_type: key.prediction_type,
                accuracy_score: summary.accuracy_score,
                mae: summary.mae,
                rmse: summary.rmse,
                r2: summary.r2,
                sample_count: previous
                    .as_ref()
                    .map_or(summary.sample_count, |p| p.sample_count.max(summary.sample_count)),
                last_updated: now,
                version: previous.as_ref().map_or(1, |p| p.version + 1),
            };
            let expected = previous.as_ref().map(|p| p.version);

            if self
                .store
                .compare_and_swap_performance(expected, next.clone())
                .await?
            {
                debug!(
                    %key,
                    version = next.version,
                    sample_count = next.sample_count,
                    accuracy_score = next.accuracy_score,
                    "performance recomputed"
                );
                return Ok(Some(next));
            }

            debug!(%key, attempt, "performance row changed concurrently, retrying");
            tokio::task::yield_now().await;
        }

        warn!(%key, attempts = self.config.max_cas_retries, "performance update gave up");
        Err(AccuracyError::Contention {
            key,
            attempts: self.config.max_cas_retries,
        })
    }

    /// Accuracy records, most recently reported first.
    pub async fn list_accuracy(
        &self,
        prediction_id: Option<Uuid>,
        limit: Option<usize>,
    ) -> Result<Vec<AccuracyRecord>> {
        let limit = self.config.list_limit(limit);
        Ok(self.store.list_accuracy(prediction_id, limit).await?)
    }

    pub async fn list_performance(
        &self,
        algorithm: Option<Algorithm>,
        prediction_type: Option<PredictionType>,
    ) -> Result<Vec<ModelPerformance>> {
        Ok(self.store.list_performance(algorithm, prediction_type).await?)
    }

    /// Drop results whose TTL has passed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self.store.delete_expired(now).await?;
        if removed > 0 {
            info!(removed, "expired predictions purged");
        }
        Ok(removed)
    }
}
