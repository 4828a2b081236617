//! Forecast orchestration.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use forecast_core::stats::{mean, ols};
use forecast_core::{accumulate_balance, derive_savings, model_for};
use forecast_spi::ForecastOutput;
use prediction_api::ForecastSettings;
use prediction_spi::{
    Algorithm, PredictionPoint, PredictionRequest, PredictionResult, PredictionServiceError,
    PredictionSummary, PredictionType, Result, TrendDirection,
};
use series_core::SeriesPreparer;
use series_spi::{CategoryService, SeriesQuery, TransactionKind, TransactionLedgerReader};
use tracing::{debug, info};
use uuid::Uuid;

use crate::executor::FitExecutor;
use crate::registry::{model_params, ModelRegistry};

/// One request in flight: the request, the settings snapshot it started with
/// and the moment it is evaluated at.
struct Run<'a> {
    request: &'a PredictionRequest,
    settings: Arc<ForecastSettings>,
    algorithm: Algorithm,
    now: DateTime<Utc>,
}

impl Run<'_> {
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn horizon(&self) -> usize {
        self.request.periods_ahead as usize
    }
}

/// A fitted forecast before it is wrapped into a result.
struct Fitted {
    dates: Vec<NaiveDate>,
    output: ForecastOutput,
    training_points: usize,
}

/// Turns a [`PredictionRequest`] into a [`PredictionResult`].
///
/// Income, expense and category forecasts are fitted on their own ledger
/// series. Savings is income minus expense, fitted with the same algorithm,
/// and balance accumulates savings on top of the current balance.
#[derive(Clone)]
pub struct ForecastOrchestrator {
    preparer: SeriesPreparer,
    categories: Arc<dyn CategoryService>,
    registry: Arc<ModelRegistry>,
    executor: FitExecutor,
    ttl: Duration,
}

impl ForecastOrchestrator {
    pub fn new(
        ledger: Arc<dyn TransactionLedgerReader>,
        categories: Arc<dyn CategoryService>,
        registry: Arc<ModelRegistry>,
        executor: FitExecutor,
        ttl: Duration,
    ) -> Self {
        Self {
            preparer: SeriesPreparer::new(ledger),
            categories,
            registry,
            executor,
            ttl,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.predict_at(request, Utc::now()).await
    }

    /// Forecast `request` as of `now`. Daily forecasts start the day after
    /// `now`; aggregated ones start at the bucket containing `now`.
    pub async fn predict_at(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> Result<PredictionResult> {
        request.validate()?;

        let settings = self.registry.snapshot();
        let algorithm = request
            .algorithm
            .unwrap_or_else(|| settings.default_algorithms.for_type(request.prediction_type));
        let run = Run {
            request,
            settings,
            algorithm,
            now,
        };
        debug!(
            user_id = %request.user_id,
            prediction_type = %request.prediction_type,
            period = %request.period,
            periods_ahead = request.periods_ahead,
            %algorithm,
            "prediction requested"
        );

        let fitted = match request.prediction_type {
            PredictionType::Income => self.predict_income(&run).await?,
            PredictionType::Expense => self.predict_expense(&run).await?,
            PredictionType::Savings => self.predict_savings(&run).await?,
            PredictionType::Balance => self.predict_balance(&run).await?,
            PredictionType::Category => self.predict_category(&run).await?,
        };

        let result = self.assemble(&run, fitted);
        info!(
            prediction_id = %result.id,
            user_id = %request.user_id,
            prediction_type = %request.prediction_type,
            %algorithm,
            training_points = result.training_points,
            "prediction generated"
        );
        Ok(result)
    }

    async fn predict_income(&self, run: &Run<'_>) -> Result<Fitted> {
        self.fit_primitive(run, TransactionKind::Income, None).await
    }

    async fn predict_expense(&self, run: &Run<'_>) -> Result<Fitted> {
        self.fit_primitive(run, TransactionKind::Expense, None).await
    }

    async fn predict_savings(&self, run: &Run<'_>) -> Result<Fitted> {
        let (income, expense) = tokio::try_join!(
            self.fit_primitive(run, TransactionKind::Income, None),
            self.fit_primitive(run, TransactionKind::Expense, None),
        )?;
        let output = derive_savings(&income.output, &expense.output)?;
        Ok(Fitted {
            dates: income.dates,
            output,
            training_points: income.training_points.min(expense.training_points),
        })
    }

    async fn predict_balance(&self, run: &Run<'_>) -> Result<Fitted> {
        let ledger = self.preparer.ledger();
        let (savings, balance) = tokio::try_join!(self.predict_savings(run), async {
            ledger
                .current_balance(&run.request.user_id)
                .await
                .map_err(PredictionServiceError::from)
        })?;
        Ok(Fitted {
            output: accumulate_balance(balance, &savings.output),
            ..savings
        })
    }

    async fn predict_category(&self, run: &Run<'_>) -> Result<Fitted> {
        let user_id = &run.request.user_id;
        let category_id = run.request.category_id.as_deref().ok_or_else(|| {
            PredictionServiceError::validation("category_id is required for category predictions")
        })?;
        if !self.categories.exists_and_owned(category_id, user_id).await? {
            debug!(%user_id, category_id, "category rejected");
            return Err(PredictionServiceError::invalid_category(category_id));
        }
        self.fit_primitive(run, TransactionKind::Expense, Some(category_id))
            .await
    }

    /// Prepare one ledger series, fit it on the worker pool and clamp the
    /// forecast at zero.
    async fn fit_primitive(
        &self,
        run: &Run<'_>,
        kind: TransactionKind,
        category_id: Option<&str>,
    ) -> Result<Fitted> {
        let settings = &run.settings;
        let period = run.request.period;

        let mut query = SeriesQuery::lookback(
            run.request.user_id.as_str(),
            kind,
            run.today(),
            settings.lookback_days.for_period(period),
        );
        if let Some(category_id) = category_id {
            query = query.for_category(category_id);
        }
        let series = self
            .preparer
            .clone()
            .with_min_non_zero_days(settings.min_non_zero_days)
            .prepare_at(&query, period)
            .await?;

        let params = model_params(settings, period, run.request.seasonality, series.len());
        let model = model_for(run.algorithm, &params);
        let horizon = run.horizon();
        let output = self
            .executor
            .run(
                model,
                series.values.clone(),
                horizon,
                run.request.include_confidence_intervals,
            )
            .await?;

        debug!(
            %kind,
            category_id,
            algorithm = %run.algorithm,
            observations = series.len(),
            "fit finished"
        );
        Ok(Fitted {
            dates: series.future_dates(horizon),
            output: output.clamp_non_negative(),
            training_points: series.len(),
        })
    }

    fn assemble(&self, run: &Run<'_>, fitted: Fitted) -> PredictionResult {
        let Fitted {
            dates,
            output,
            training_points,
        } = fitted;
        let bound = |bounds: &Option<Vec<f64>>, i: usize| {
            bounds.as_ref().and_then(|b| b.get(i).copied())
        };

        let points = dates
            .into_iter()
            .zip(output.values.iter())
            .enumerate()
            .map(|(i, (date, &predicted_value))| PredictionPoint {
                date,
                predicted_value,
                lower_bound: bound(&output.lower, i),
                upper_bound: bound(&output.upper, i),
            })
            .collect();

        PredictionResult {
            id: Uuid::new_v4(),
            request: run.request.clone(),
            algorithm: run.algorithm,
            generated_at: run.now,
            expires_at: run.now + self.ttl,
            points,
            training_points,
            summary: summarize(&output.values, run.settings.trend_threshold),
        }
    }
}

/// Average of the forecast and its direction.
///
/// The direction compares the OLS slope of the predicted values, relative to
/// `max(|avg|, 1)`, against `threshold`.
pub fn summarize(values: &[f64], threshold: f64) -> PredictionSummary {
    let avg_predicted = mean(values);
    let slope = ols(values).map(|line| line.slope).unwrap_or(0.0);
    let relative = slope / avg_predicted.abs().max(1.0);

    let trend = if relative > threshold {
        TrendDirection::Rising
    } else if relative < -threshold {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };
    PredictionSummary {
        avg_predicted,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use prediction_spi::{ErrorKind, Period};
    use series_core::{InMemoryCategories, InMemoryLedger};
    use series_spi::LedgerEntry;

    fn now() -> DateTime<Utc> {
        // a Wednesday, mid-month
        Utc.with_ymd_and_hms(2024, 6, 19, 15, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    /// 120 days up to today: income 3,000 every 1st and 15th, expense
    /// 100 + weekday bump every day, groceries once a week
    fn entries() -> Vec<LedgerEntry> {
        let mut entries = Vec::new();
        for back in 0..120 {
            let date = today() - Duration::days(back);
            let i = 119 - back;
            entries.push(LedgerEntry::new(
                "u1",
                date,
                TransactionKind::Expense,
                100.0 + (i % 7) as f64 * 10.0,
            ));
            if back % 7 == 0 {
                entries.push(
                    LedgerEntry::new("u1", date, TransactionKind::Expense, 60.0)
                        .with_category("groceries"),
                );
            }
            if matches!(date.day(), 1 | 15) {
                entries.push(LedgerEntry::new("u1", date, TransactionKind::Income, 3_000.0));
            }
        }
        entries
    }

    fn orchestrator_with(entries: Vec<LedgerEntry>) -> ForecastOrchestrator {
        let categories = InMemoryCategories::from_entries(&entries);
        let settings = ForecastSettings {
            min_non_zero_days: 5,
            ..ForecastSettings::default()
        };
        ForecastOrchestrator::new(
            Arc::new(InMemoryLedger::from_entries(entries)),
            Arc::new(categories),
            Arc::new(ModelRegistry::new(settings)),
            FitExecutor::new(2, std::time::Duration::from_secs(5)).unwrap(),
            Duration::days(7),
        )
    }

    #[tokio::test]
    async fn test_daily_expense_points_start_tomorrow() {
        let orchestrator = orchestrator_with(entries());
        let request = PredictionRequest::new("u1", PredictionType::Expense)
            .with_period(Period::Daily, 7);
        let result = orchestrator.predict_at(&request, now()).await.unwrap();

        assert_eq!(result.points.len(), 7);
        assert_eq!(result.points[0].date, today() + Duration::days(1));
        assert!(result.points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(result.algorithm, Algorithm::Seasonal);
        assert_eq!(result.training_points, 365);
        assert_eq!(result.expires_at - result.generated_at, Duration::days(7));
        for point in &result.points {
            let (lower, upper) = (point.lower_bound.unwrap(), point.upper_bound.unwrap());
            assert!(lower <= point.predicted_value && point.predicted_value <= upper);
            assert!(lower >= 0.0);
        }
    }

    #[tokio::test]
    async fn test_monthly_points_start_at_current_month() {
        let orchestrator = orchestrator_with(entries());
        let request = PredictionRequest::new("u1", PredictionType::Income)
            .with_period(Period::Monthly, 3)
            .with_intervals(false);
        let result = orchestrator.predict_at(&request, now()).await.unwrap();

        let dates: Vec<NaiveDate> = result.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            ]
        );
        assert!(result.points.iter().all(|p| p.lower_bound.is_none()));
    }

    #[tokio::test]
    async fn test_savings_is_income_minus_expense() {
        let orchestrator = orchestrator_with(entries());
        let base = |t| {
            PredictionRequest::new("u1", t)
                .with_period(Period::Weekly, 4)
                .with_algorithm(Algorithm::Linear)
        };
        let income = orchestrator
            .predict_at(&base(PredictionType::Income), now())
            .await
            .unwrap();
        let expense = orchestrator
            .predict_at(&base(PredictionType::Expense), now())
            .await
            .unwrap();
        let savings = orchestrator
            .predict_at(&base(PredictionType::Savings), now())
            .await
            .unwrap();

        for i in 0..4 {
            assert_eq!(savings.points[i].date, income.points[i].date);
            let expected = income.points[i].predicted_value - expense.points[i].predicted_value;
            assert!((savings.points[i].predicted_value - expected).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_default_savings_matches_default_primitives() {
        let orchestrator = orchestrator_with(entries());
        let request = |t| PredictionRequest::new("u1", t).with_period(Period::Daily, 7);
        let income = orchestrator
            .predict_at(&request(PredictionType::Income), now())
            .await
            .unwrap();
        let expense = orchestrator
            .predict_at(&request(PredictionType::Expense), now())
            .await
            .unwrap();
        let savings = orchestrator
            .predict_at(&request(PredictionType::Savings), now())
            .await
            .unwrap();

        assert_eq!(savings.algorithm, income.algorithm);
        assert_eq!(savings.algorithm, expense.algorithm);
        for ((s, i), e) in savings.points.iter().zip(&income.points).zip(&expense.points) {
            assert_eq!(s.date, i.date);
            let expected = i.predicted_value - e.predicted_value;
            assert!((s.predicted_value - expected).abs() < 1e-6, "{} != {expected}", s.predicted_value);
        }
    }

    #[tokio::test]
    async fn test_balance_starts_from_current_balance() {
        let entries = entries();
        let current: f64 = entries
            .iter()
            .map(|e| match e.kind {
                TransactionKind::Income => e.amount,
                TransactionKind::Expense => -e.amount,
            })
            .sum();
        let orchestrator = orchestrator_with(entries);
        let savings = orchestrator
            .predict_at(
                &PredictionRequest::new("u1", PredictionType::Savings).with_period(Period::Weekly, 3),
                now(),
            )
            .await
            .unwrap();
        let balance = orchestrator
            .predict_at(
                &PredictionRequest::new("u1", PredictionType::Balance).with_period(Period::Weekly, 3),
                now(),
            )
            .await
            .unwrap();

        assert_eq!(balance.algorithm, Algorithm::Seasonal);
        let mut running = current;
        for (s, b) in savings.points.iter().zip(balance.points.iter()) {
            running += s.predicted_value;
            assert!((b.predicted_value - running).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_category_requires_ownership() {
        let orchestrator = orchestrator_with(entries());
        let request = PredictionRequest::category("u2", "groceries").with_period(Period::Weekly, 2);
        let err = orchestrator.predict_at(&request, now()).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidCategory));

        let request = PredictionRequest::category("u1", "groceries").with_period(Period::Weekly, 2);
        let result = orchestrator.predict_at(&request, now()).await.unwrap();
        assert_eq!(result.algorithm, Algorithm::MovingAverage);
        assert_eq!(result.points.len(), 2);
    }

    #[tokio::test]
    async fn test_ten_non_zero_days_meet_the_default_minimum() {
        let income = |days: i64| -> Vec<LedgerEntry> {
            (0..days)
                .map(|n| {
                    LedgerEntry::new(
                        "u1",
                        today() - Duration::days(n * 3),
                        TransactionKind::Income,
                        500.0 + n as f64,
                    )
                })
                .collect()
        };
        let orchestrator = |entries: Vec<LedgerEntry>| {
            let categories = InMemoryCategories::from_entries(&entries);
            ForecastOrchestrator::new(
                Arc::new(InMemoryLedger::from_entries(entries)),
                Arc::new(categories),
                Arc::new(ModelRegistry::new(ForecastSettings::default())),
                FitExecutor::new(2, std::time::Duration::from_secs(5)).unwrap(),
                Duration::days(7),
            )
        };
        let request = PredictionRequest::new("u1", PredictionType::Income)
            .with_period(Period::Daily, 5);

        let err = orchestrator(income(9))
            .predict_at(&request, now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InsufficientData));

        let result = orchestrator(income(10))
            .predict_at(&request, now())
            .await
            .unwrap();
        assert_eq!(result.points.len(), 5);
    }

    #[tokio::test]
    async fn test_sparse_history_is_insufficient_data() {
        let entries = (0..3)
            .map(|back| {
                LedgerEntry::new("u1", today() - Duration::days(back), TransactionKind::Income, 10.0)
            })
            .collect();
        let orchestrator = orchestrator_with(entries);
        let err = orchestrator
            .predict_at(&PredictionRequest::new("u1", PredictionType::Income), now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InsufficientData));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_reading() {
        let orchestrator = orchestrator_with(Vec::new());
        let request =
            PredictionRequest::new("u1", PredictionType::Income).with_period(Period::Daily, 0);
        let err = orchestrator.predict_at(&request, now()).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_summary_trend() {
        let rising = summarize(&[100.0, 110.0, 120.0], 0.01);
        assert_eq!(rising.trend, TrendDirection::Rising);
        assert!((rising.avg_predicted - 110.0).abs() < 1e-9);

        assert_eq!(summarize(&[120.0, 110.0, 100.0], 0.01).trend, TrendDirection::Falling);
        assert_eq!(summarize(&[100.0, 100.5, 101.0], 0.01).trend, TrendDirection::Stable);
        assert_eq!(summarize(&[42.0], 0.01).trend, TrendDirection::Stable);
    }
}
