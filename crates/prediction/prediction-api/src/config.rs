//! Engine configuration types.

use std::str::FromStr;

use accuracy_spi::AccuracyConfig;
use anomaly_api::AnomalyConfig;
use prediction_spi::{Algorithm, Period, PredictionType};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ============================================================================
// Forecast Settings
// ============================================================================

/// History read per forecast, by period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookbackDays {
    pub daily: u32,
    pub weekly: u32,
    pub monthly: u32,
    pub quarterly: u32,
    pub yearly: u32,
}

impl Default for LookbackDays {
    fn default() -> Self {
        Self {
            daily: 365,
            weekly: 365,
            monthly: 730,
            quarterly: 1095,
            yearly: 1825,
        }
    }
}

impl LookbackDays {
    pub fn for_period(&self, period: Period) -> u32 {
        match period {
            Period::Daily => self.daily,
            Period::Weekly => self.weekly,
            Period::Monthly => self.monthly,
            Period::Quarterly => self.quarterly,
            Period::Yearly => self.yearly,
        }
    }
}

/// Algorithm used when a request does not name one.
///
/// Savings and balance are derived from the income and expense fits, so they
/// use the primitive defaults and `income` must equal `expense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultAlgorithms {
    pub income: Algorithm,
    pub expense: Algorithm,
    pub category: Algorithm,
}

impl Default for DefaultAlgorithms {
    fn default() -> Self {
        Self {
            income: Algorithm::Seasonal,
            expense: Algorithm::Seasonal,
            category: Algorithm::MovingAverage,
        }
    }
}

impl DefaultAlgorithms {
    pub fn for_type(&self, prediction_type: PredictionType) -> Algorithm {
        match prediction_type {
            PredictionType::Income => self.income,
            PredictionType::Expense => self.expense,
            PredictionType::Savings | PredictionType::Balance => self.income,
            PredictionType::Category => self.category,
        }
    }
}

/// Forecasting settings. Held as an immutable snapshot and replaced whole on
/// reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub lookback_days: LookbackDays,
    /// Fewest non-zero days a primitive series needs (default: 10).
    pub min_non_zero_days: usize,
    /// Trailing window of the moving average (default: 7).
    pub moving_average_window: usize,
    /// Confidence level of seasonal bands (default: 0.95).
    pub confidence_level: f64,
    /// Relative slope below which a forecast counts as stable (default: 0.01).
    pub trend_threshold: f64,
    /// Longest broader seasonal cycle searched for (default: 31).
    pub broad_season_max_lag: usize,
    pub default_algorithms: DefaultAlgorithms,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            lookback_days: LookbackDays::default(),
            min_non_zero_days: 10,
            moving_average_window: 7,
            confidence_level: 0.95,
            trend_threshold: 0.01,
            broad_season_max_lag: 31,
            default_algorithms: DefaultAlgorithms::default(),
        }
    }
}

impl ForecastSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for period in Period::ALL {
            if self.lookback_days.for_period(period) < 14 {
                return Err(ConfigError::Invalid(format!(
                    "{} lookback must cover at least 14 days",
                    period
                )));
            }
        }
        if self.moving_average_window == 0 {
            return Err(ConfigError::Invalid(
                "moving_average_window must be at least 1".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::Invalid(
                "confidence_level must be between 0 and 1".to_string(),
            ));
        }
        if !(self.trend_threshold >= 0.0) {
            return Err(ConfigError::Invalid(
                "trend_threshold must not be negative".to_string(),
            ));
        }
        let defaults = &self.default_algorithms;
        if defaults.income != defaults.expense {
            return Err(ConfigError::Invalid(format!(
                "default income algorithm ({}) and expense algorithm ({}) must match",
                defaults.income, defaults.expense
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub forecast: ForecastSettings,
    pub anomaly: AnomalyConfig,
    pub accuracy: AccuracyConfig,
    /// Wall-clock budget of one model fit (default: 5000).
    pub fit_timeout_ms: u64,
    /// Threads of the fit pool (default: available parallelism).
    pub worker_threads: usize,
    /// Largest accepted batch (default: 10).
    pub batch_limit: usize,
    /// Days a stored result stays reportable (default: 7).
    pub prediction_ttl_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastSettings::default(),
            anomaly: AnomalyConfig::default(),
            accuracy: AccuracyConfig::default(),
            fit_timeout_ms: 5_000,
            worker_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            batch_limit: 10,
            prediction_ttl_days: 7,
        }
    }
}

/// Overwrite `target` with the parsed value of `name`, when set.
fn overlay<T, F>(lookup: &F, name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(name) {
        *target = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: name.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}

impl EngineConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each known
    /// variable, then validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        overlay(&lookup, "ENGINE_FIT_TIMEOUT_MS", &mut config.fit_timeout_ms)?;
        overlay(&lookup, "ENGINE_WORKER_THREADS", &mut config.worker_threads)?;
        overlay(&lookup, "ENGINE_BATCH_LIMIT", &mut config.batch_limit)?;
        overlay(&lookup, "ENGINE_PREDICTION_TTL_DAYS", &mut config.prediction_ttl_days)?;

        let forecast = &mut config.forecast;
        overlay(&lookup, "FORECAST_MIN_NON_ZERO_DAYS", &mut forecast.min_non_zero_days)?;
        overlay(&lookup, "FORECAST_MOVING_AVERAGE_WINDOW", &mut forecast.moving_average_window)?;
        overlay(&lookup, "FORECAST_CONFIDENCE_LEVEL", &mut forecast.confidence_level)?;
        overlay(&lookup, "FORECAST_TREND_THRESHOLD", &mut forecast.trend_threshold)?;
        overlay(&lookup, "FORECAST_BROAD_SEASON_MAX_LAG", &mut forecast.broad_season_max_lag)?;

        let anomaly = &mut config.anomaly;
        overlay(&lookup, "ANOMALY_WINDOW_DAYS", &mut anomaly.window_days)?;
        overlay(&lookup, "ANOMALY_SPIKE_RATIO", &mut anomaly.spike_ratio)?;

        overlay(&lookup, "ACCURACY_MAX_CAS_RETRIES", &mut config.accuracy.max_cas_retries)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.forecast.validate()?;
        self.anomaly
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.fit_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fit_timeout_ms must be positive".to_string()));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid("worker_threads must be at least 1".to_string()));
        }
        if self.batch_limit == 0 {
            return Err(ConfigError::Invalid("batch_limit must be at least 1".to_string()));
        }
        if self.prediction_ttl_days < 1 {
            return Err(ConfigError::Invalid(
                "prediction_ttl_days must be at least 1".to_string(),
            ));
        }
        if self.accuracy.max_cas_retries == 0 {
            return Err(ConfigError::Invalid(
                "accuracy.max_cas_retries must be at least 1".to_string(),
            ));
        }
        if !(self.accuracy.epsilon > 0.0) {
            return Err(ConfigError::Invalid(
                "accuracy.epsilon must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
