//! Fit worker pool.

use std::sync::Arc;
use std::time::Duration;

use forecast_spi::{ForecastError, ForecastModel, ForecastOutput, Result};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Runs model fits on a dedicated thread pool, off the async runtime.
///
/// Every fit is awaited under a wall-clock budget. When the budget runs out
/// the caller gets [`ForecastError::ModelFitTimeout`] and the fit's result,
/// if it ever arrives, is discarded. A fit whose caller has already gone away
/// by the time a worker picks it up is not started.
#[derive(Clone)]
pub struct FitExecutor {
    pool: Arc<ThreadPool>,
    budget: Duration,
}

impl FitExecutor {
    pub fn new(threads: usize, budget: Duration) -> std::result::Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("fit-worker-{}", i))
            .build()?;
        Ok(Self {
            pool: Arc::new(pool),
            budget,
        })
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Fit `series` with `model` and forecast `horizon` steps.
    pub async fn run(
        &self,
        model: Box<dyn ForecastModel>,
        series: Vec<f64>,
        horizon: usize,
        want_intervals: bool,
    ) -> Result<ForecastOutput> {
        let algorithm = model.algorithm();
        let (tx, rx) = oneshot::channel();

        self.pool.spawn(move || {
            if tx.is_closed() {
                debug!(%algorithm, "fit abandoned before start");
                return;
            }
            let _ = tx.send(model.fit_predict(&series, horizon, want_intervals));
        });

        match tokio::time::timeout(self.budget, rx).await {
            Ok(Ok(output)) => output,
            Ok(Err(_)) => Err(ForecastError::ModelFit(
                "fit worker stopped before returning a result".to_string(),
            )),
            Err(_) => {
                let budget_ms = u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX);
                warn!(%algorithm, budget_ms, "fit exceeded its budget");
                Err(ForecastError::ModelFitTimeout { budget_ms })
            }
        }
    }
}
