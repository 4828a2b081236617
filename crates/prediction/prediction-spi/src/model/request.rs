//! Prediction request types.

use forecast_spi::Algorithm;
use serde::{Deserialize, Serialize};
use series_spi::{Period, TransactionKind};

use crate::error::{PredictionServiceError, Result};

/// Largest accepted `periods_ahead`.
pub const MAX_PERIODS_AHEAD: u32 = 36;

/// What a request forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
    Income,
    Expense,
    /// Income minus expense, derived from the two primitive forecasts
    Savings,
    /// Current balance plus cumulative savings
    Balance,
    /// Expense scoped to one category
    Category,
}

impl PredictionType {
    pub const ALL: [PredictionType; 5] = [
        PredictionType::Income,
        PredictionType::Expense,
        PredictionType::Savings,
        PredictionType::Balance,
        PredictionType::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::Income => "income",
            PredictionType::Expense => "expense",
            PredictionType::Savings => "savings",
            PredictionType::Balance => "balance",
            PredictionType::Category => "category",
        }
    }

    /// Ledger side read for primitive types; `None` for derived ones.
    pub fn ledger_kind(&self) -> Option<TransactionKind> {
        match self {
            PredictionType::Income => Some(TransactionKind::Income),
            PredictionType::Expense | PredictionType::Category => Some(TransactionKind::Expense),
            PredictionType::Savings | PredictionType::Balance => None,
        }
    }

    /// Amounts of this type can never be negative.
    pub fn is_non_negative(&self) -> bool {
        self.ledger_kind().is_some()
    }
}

impl std::fmt::Display for PredictionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PredictionType {
    type Err = PredictionServiceError;

    fn from_str(s: &str) -> Result<Self> {
        PredictionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PredictionServiceError::validation(format!("unknown prediction type '{}'", s))
            })
    }
}

fn default_period() -> Period {
    Period::Monthly
}

fn default_periods_ahead() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

/// A forecast request. Ephemeral: only its snapshot inside a
/// [`crate::PredictionResult`] is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub user_id: String,
    pub prediction_type: PredictionType,
    #[serde(default = "default_period")]
    pub period: Period,
    #[serde(default = "default_periods_ahead")]
    pub periods_ahead: u32,
    /// Falls back to the configured default for the prediction type
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    #[serde(default = "default_true")]
    pub include_confidence_intervals: bool,
    /// Search for a broader seasonal cycle on top of the primary one
    #[serde(default = "default_true")]
    pub seasonality: bool,
    #[serde(default)]
    pub category_id: Option<String>,
}

impl PredictionRequest {
    pub fn new(user_id: impl Into<String>, prediction_type: PredictionType) -> Self {
        Self {
            user_id: user_id.into(),
            prediction_type,
            period: default_period(),
            periods_ahead: default_periods_ahead(),
            algorithm: None,
            include_confidence_intervals: true,
            seasonality: true,
            category_id: None,
        }
    }

    /// Category request for `category_id`.
    pub fn category(user_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self::new(user_id, PredictionType::Category).with_category(category_id)
    }

    pub fn with_period(mut self, period: Period, periods_ahead: u32) -> Self {
        self.period = period;
        self.periods_ahead = periods_ahead;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_intervals(mut self, include: bool) -> Self {
        self.include_confidence_intervals = include;
        self
    }

    pub fn with_seasonality(mut self, seasonality: bool) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Reject malformed requests before any data is read.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(PredictionServiceError::validation("user_id must not be empty"));
        }
        if !(1..=MAX_PERIODS_AHEAD).contains(&self.periods_ahead) {
            return Err(PredictionServiceError::validation(format!(
                "periods_ahead must be between 1 and {}, got {}",
                MAX_PERIODS_AHEAD, self.periods_ahead
            )));
        }
        match (self.prediction_type, self.category_id.as_deref()) {
            (PredictionType::Category, None) => Err(PredictionServiceError::validation(
                "category_id is required for category predictions",
            )),
            (PredictionType::Category, Some(id)) if id.trim().is_empty() => Err(
                PredictionServiceError::validation("category_id must not be empty"),
            ),
            (PredictionType::Category, Some(_)) => Ok(()),
            (other, Some(_)) => Err(PredictionServiceError::validation(format!(
                "category_id is only accepted for category predictions, not {}",
                other
            ))),
            (_, None) => Ok(()),
        }
    }
}
