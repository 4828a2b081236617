//! Prediction service: the single entry point behind the transport layer.

use std::sync::Arc;

use accuracy_core::AccuracyTracker;
use accuracy_spi::{AccuracyRecord, AccuracyReport, ModelPerformance, PredictionStore};
use anomaly_core::{CategorySpikeDetector, MadDetector};
use anomaly_spi::{AnomalyDetector, AnomalyError, AnomalyRecord, ScanTarget};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use prediction_api::{AnomalyConfig, ConfigError, EngineConfig, ForecastSettings};
use prediction_spi::{
    Algorithm, BatchEntry, BatchItemFailure, BatchResult, PredictionRequest, PredictionResult,
    PredictionServiceError, PredictionType, Result,
};
use series_core::SeriesPreparer;
use series_spi::{
    CategoryService, SeriesError, SeriesQuery, TransactionKind, TransactionLedgerReader,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::executor::FitExecutor;
use crate::orchestrator::ForecastOrchestrator;
use crate::registry::ModelRegistry;

/// A batch item after dispatch.
enum Pending {
    Running(JoinHandle<Result<PredictionResult>>),
    Rejected(PredictionServiceError),
}

/// Forecasting, anomaly scans and accuracy tracking for one ledger.
///
/// Cheap to clone; clones share the worker pool, the settings registry and
/// the prediction store.
#[derive(Clone)]
pub struct PredictionService {
    orchestrator: ForecastOrchestrator,
    tracker: AccuracyTracker,
    preparer: SeriesPreparer,
    mad: MadDetector,
    spikes: CategorySpikeDetector,
    anomaly: AnomalyConfig,
    batch_limit: usize,
}

impl PredictionService {
    pub fn new(
        config: EngineConfig,
        ledger: Arc<dyn TransactionLedgerReader>,
        categories: Arc<dyn CategoryService>,
        store: Arc<dyn PredictionStore>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let budget = std::time::Duration::from_millis(config.fit_timeout_ms);
        let executor = FitExecutor::new(config.worker_threads, budget)
            .map_err(|e| ConfigError::Invalid(format!("fit worker pool: {}", e)))?;
        let registry = Arc::new(ModelRegistry::new(config.forecast));
        let orchestrator = ForecastOrchestrator::new(
            Arc::clone(&ledger),
            categories,
            registry,
            executor,
            Duration::days(config.prediction_ttl_days),
        );
        info!(
            worker_threads = config.worker_threads,
            fit_timeout_ms = config.fit_timeout_ms,
            batch_limit = config.batch_limit,
            "prediction service ready"
        );

        Ok(Self {
            orchestrator,
            tracker: AccuracyTracker::new(store, config.accuracy),
            preparer: SeriesPreparer::new(ledger),
            mad: MadDetector::new(config.anomaly.clone()),
            spikes: CategorySpikeDetector::new(config.anomaly.clone()),
            anomaly: config.anomaly,
            batch_limit: config.batch_limit,
        })
    }

    /// The forecasting settings new requests start with.
    pub fn settings(&self) -> Arc<ForecastSettings> {
        self.orchestrator.registry().snapshot()
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    pub fn tracker(&self) -> &AccuracyTracker {
        &self.tracker
    }

    // ========================================================================
    // Forecasts
    // ========================================================================

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.predict_at(request, Utc::now()).await
    }

    /// Forecast `request` as of `now` and store the result for later
    /// accuracy reports.
    pub async fn predict_at(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> Result<PredictionResult> {
        let result = self.orchestrator.predict_at(request, now).await?;
        self.tracker.record_prediction(&result).await?;
        Ok(result)
    }

    pub async fn predict_batch(&self, requests: Vec<PredictionRequest>) -> Result<BatchResult> {
        self.predict_batch_at(requests, Utc::now()).await
    }

    pub async fn predict_batch_at(
        &self,
        requests: Vec<PredictionRequest>,
        now: DateTime<Utc>,
    ) -> Result<BatchResult> {
        let entries = requests.into_iter().map(BatchEntry::from).collect();
        self.predict_entries_at(entries, now).await
    }

    pub async fn predict_entries(&self, entries: Vec<BatchEntry>) -> Result<BatchResult> {
        self.predict_entries_at(entries, Utc::now()).await
    }

    /// Run every request of the batch concurrently.
    ///
    /// Only a malformed batch (empty or over the limit) fails as a whole.
    /// Each item's failure, including entries rejected before they got here,
    /// is reported in `failed` with its index and never affects the other
    /// items.
    pub async fn predict_entries_at(
        &self,
        entries: Vec<BatchEntry>,
        now: DateTime<Utc>,
    ) -> Result<BatchResult> {
        if entries.is_empty() {
            return Err(PredictionServiceError::validation(
                "batch must contain at least one request",
            ));
        }
        if entries.len() > self.batch_limit {
            return Err(PredictionServiceError::validation(format!(
                "batch accepts at most {} requests, got {}",
                self.batch_limit,
                entries.len()
            )));
        }

        let pending: Vec<_> = entries
            .into_iter()
            .map(|entry| match entry {
                BatchEntry::Request(request) => {
                    let service = self.clone();
                    let task_request = request.clone();
                    let handle =
                        tokio::spawn(async move { service.predict_at(&task_request, now).await });
                    (request, Pending::Running(handle))
                }
                BatchEntry::Rejected { request, error } => (request, Pending::Rejected(error)),
            })
            .collect();

        let mut batch = BatchResult::default();
        for (index, (request, item)) in pending.into_iter().enumerate() {
            let outcome = match item {
                Pending::Running(handle) => handle.await.unwrap_or_else(|e| {
                    Err(PredictionServiceError::Infrastructure(format!(
                        "batch item task failed: {}",
                        e
                    )))
                }),
                Pending::Rejected(error) => Err(error),
            };
            match outcome {
                Ok(result) => batch.succeeded.push(result),
                Err(error) => {
                    warn!(
                        index,
                        user_id = %request.user_id,
                        prediction_type = %request.prediction_type,
                        error = %error,
                        "batch item failed"
                    );
                    batch.failed.push(BatchItemFailure::new(index, request, &error));
                }
            }
        }

        info!(
            succeeded = batch.succeeded.len(),
            failed = batch.failed.len(),
            "batch finished"
        );
        Ok(batch)
    }

    /// Replace the forecasting settings. Requests already running keep the
    /// snapshot they started with.
    pub fn reload_settings(&self, settings: ForecastSettings) -> Result<()> {
        self.orchestrator
            .registry()
            .reload(settings)
            .map(|_| ())
            .map_err(|e| PredictionServiceError::validation(e.to_string()))
    }

    // ========================================================================
    // Anomalies
    // ========================================================================

    pub async fn detect_anomalies(&self, user_id: &str) -> Result<Vec<AnomalyRecord>> {
        self.detect_anomalies_at(user_id, Utc::now().date_naive()).await
    }

    /// Scan the expense window ending at `today`: daily spikes over the
    /// whole expense series, then weekly spikes per expense category.
    ///
    /// Records come back ordered by date, most severe first within a date.
    pub async fn detect_anomalies_at(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<AnomalyRecord>> {
        if user_id.trim().is_empty() {
            return Err(PredictionServiceError::validation("user_id must not be empty"));
        }

        let settings = self.settings();
        let query = SeriesQuery::lookback(
            user_id,
            TransactionKind::Expense,
            today,
            self.anomaly.window_days,
        );
        let series = self
            .preparer
            .clone()
            .with_min_non_zero_days(settings.min_non_zero_days)
            .prepare(&query)
            .await?;
        let mut records = self.mad.detect(&ScanTarget::new(user_id, &series))?;

        let categories = self
            .preparer
            .ledger()
            .expense_categories(user_id, query.start, query.end)
            .await?;
        let category_preparer = self.preparer.clone().with_min_non_zero_days(1);
        for category_id in &categories {
            let scoped = query.clone().for_category(category_id.as_str());
            let series = match category_preparer.prepare(&scoped).await {
                Ok(series) => series,
                Err(SeriesError::InsufficientData { .. }) => continue,
                Err(e) => return Err(e.into()),
            };
            let target = ScanTarget::new(user_id, &series).for_category(category_id);
            match self.spikes.detect(&target) {
                Ok(found) => records.extend(found),
                Err(AnomalyError::InsufficientData { .. }) => {
                    debug!(user_id, category_id = %category_id, "category too short to scan");
                }
                Err(e) => return Err(e.into()),
            }
        }

        records.sort_by(|a, b| a.date.cmp(&b.date).then(b.severity.cmp(&a.severity)));
        info!(
            user_id,
            categories = categories.len(),
            anomalies = records.len(),
            "anomaly scan finished"
        );
        Ok(records)
    }

    // ========================================================================
    // Accuracy
    // ========================================================================

    pub async fn report_actual(&self, report: &AccuracyReport) -> Result<AccuracyRecord> {
        Ok(self.tracker.report_actual(report).await?)
    }

    pub async fn report_actual_at(
        &self,
        report: &AccuracyReport,
        now: DateTime<Utc>,
    ) -> Result<AccuracyRecord> {
        Ok(self.tracker.report_actual_at(report, now).await?)
    }

    pub async fn list_accuracy(
        &self,
        prediction_id: Option<Uuid>,
        limit: Option<usize>,
    ) -> Result<Vec<AccuracyRecord>> {
        Ok(self.tracker.list_accuracy(prediction_id, limit).await?)
    }

    pub async fn list_performance(
        &self,
        algorithm: Option<Algorithm>,
        prediction_type: Option<PredictionType>,
    ) -> Result<Vec<ModelPerformance>> {
        Ok(self.tracker.list_performance(algorithm, prediction_type).await?)
    }

    pub async fn purge_expired(&self) -> Result<usize> {
        Ok(self.tracker.purge_expired(Utc::now()).await?)
    }
}
