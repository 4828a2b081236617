//! Forecast settings registry.

use std::sync::{Arc, PoisonError, RwLock};

use forecast_core::ModelParams;
use prediction_api::{ConfigError, ForecastSettings};
use prediction_spi::Period;
use tracing::info;

/// Holds the current [`ForecastSettings`] snapshot.
///
/// Readers take an `Arc` to the snapshot and keep it for the whole request;
/// [`ModelRegistry::reload`] swaps in a new snapshot without touching the one
/// a running request holds.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    current: RwLock<Arc<ForecastSettings>>,
}

impl ModelRegistry {
    pub fn new(settings: ForecastSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    pub fn snapshot(&self) -> Arc<ForecastSettings> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Validate `settings` and make them current. Returns the replaced snapshot.
    pub fn reload(&self, settings: ForecastSettings) -> Result<Arc<ForecastSettings>, ConfigError> {
        settings.validate()?;
        let next = Arc::new(settings);
        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, next)
        };
        info!("forecast settings reloaded");
        Ok(previous)
    }
}

/// Model parameters for a series of `observations` buckets at `period`.
///
/// The primary season comes from the period. With `seasonality` set, a
/// broader cycle is searched for up to `min(broad_season_max_lag, n / 2)`,
/// provided that leaves room above the primary season.
pub fn model_params(
    settings: &ForecastSettings,
    period: Period,
    seasonality: bool,
    observations: usize,
) -> ModelParams {
    let season = period.primary_season();
    let broad_season_max_lag = if seasonality {
        let max_lag = settings.broad_season_max_lag.min(observations / 2);
        let min_lag = season.map_or(2, |p| p + 1);
        (max_lag > min_lag).then_some(max_lag)
    } else {
        None
    };

    ModelParams {
        season,
        broad_season_max_lag,
        moving_average_window: settings.moving_average_window,
        confidence_level: settings.confidence_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_swaps_snapshot() {
        let registry = ModelRegistry::default();
        let before = registry.snapshot();

        let settings = ForecastSettings {
            moving_average_window: 14,
            ..ForecastSettings::default()
        };
        let previous = registry.reload(settings).unwrap();

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.moving_average_window, 7);
        assert_eq!(registry.snapshot().moving_average_window, 14);
    }

    #[test]
    fn test_invalid_reload_keeps_current() {
        let registry = ModelRegistry::default();
        let settings = ForecastSettings {
            confidence_level: 2.0,
            ..ForecastSettings::default()
        };
        assert!(registry.reload(settings).is_err());
        assert_eq!(registry.snapshot().confidence_level, 0.95);
    }

    #[test]
    fn test_params_for_daily_with_seasonality() {
        let params = model_params(&ForecastSettings::default(), Period::Daily, true, 365);
        assert_eq!(params.season, Some(7));
        assert_eq!(params.broad_season_max_lag, Some(31));
        assert_eq!(params.moving_average_window, 7);
    }

    #[test]
    fn test_params_without_room_for_broad_cycle() {
        let settings = ForecastSettings::default();
        // monthly: 24 buckets, max lag 12 does not exceed 12 + 1
        let params = model_params(&settings, Period::Monthly, true, 24);
        assert_eq!(params.season, Some(12));
        assert_eq!(params.broad_season_max_lag, None);

        let params = model_params(&settings, Period::Daily, false, 365);
        assert_eq!(params.broad_season_max_lag, None);

        let params = model_params(&settings, Period::Yearly, true, 5);
        assert_eq!(params.season, None);
        assert_eq!(params.broad_season_max_lag, None);
    }
}
