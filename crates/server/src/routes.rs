//! API routes and handlers

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use prediction_facade::{
    AccuracyRecord, AccuracyReport, Algorithm, AnomalyRecord, BatchEntry, BatchResult,
    ModelPerformance, PredictionRequest, PredictionResult, PredictionService,
    PredictionServiceError, PredictionType,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the caller's user id
pub const USER_HEADER: &str = "x-user-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
}

/// Build the router with every endpoint and the middleware stack.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health/live", get(liveness))
        .route("/health", get(liveness))
        // Forecasts
        .route("/predictions/income", get(predict_income))
        .route("/predictions/expense", get(predict_expense))
        .route("/predictions/savings", get(predict_savings))
        .route("/predictions/balance", get(predict_balance))
        .route("/predictions/category/:category_id", get(predict_category))
        .route("/predictions/batch", post(predict_batch))
        // Anomalies and accuracy
        .route("/predictions/anomalies", get(detect_anomalies))
        .route("/predictions/accuracy", get(list_accuracy))
        .route("/predictions/accuracy/update", post(report_actual))
        .route("/predictions/performance", get(list_performance))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingUser)
}

/// Liveness probe
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============================================================================
// Forecasts
// ============================================================================

/// Forecast options shared by the query string and batch items; anything
/// left out takes the request default.
///
/// Period and algorithm names stay strings here so an unknown name is
/// reported as a typed error for its own item.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastParams {
    pub period: Option<String>,
    pub periods_ahead: Option<u32>,
    pub algorithm: Option<String>,
    pub include_confidence_intervals: Option<bool>,
    pub seasonality: Option<bool>,
}

impl ForecastParams {
    fn into_entry(
        self,
        user_id: String,
        prediction_type: PredictionType,
        category_id: Option<String>,
    ) -> BatchEntry {
        let mut request = PredictionRequest::new(user_id, prediction_type);
        if let Some(periods_ahead) = self.periods_ahead {
            request.periods_ahead = periods_ahead;
        }
        if let Some(include) = self.include_confidence_intervals {
            request.include_confidence_intervals = include;
        }
        if let Some(seasonality) = self.seasonality {
            request.seasonality = seasonality;
        }
        request.category_id = category_id;

        match self.apply_names(&mut request) {
            Ok(()) => BatchEntry::Request(request),
            Err(error) => BatchEntry::Rejected { request, error },
        }
    }

    fn apply_names(&self, request: &mut PredictionRequest) -> Result<(), PredictionServiceError> {
        if let Some(period) = &self.period {
            request.period = period.parse().map_err(PredictionServiceError::validation)?;
        }
        if let Some(algorithm) = &self.algorithm {
            request.algorithm = Some(algorithm.parse::<Algorithm>()?);
        }
        Ok(())
    }
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| PredictionServiceError::validation(rejection.body_text()).into())
}

fn json_payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| PredictionServiceError::validation(rejection.body_text()).into())
}

async fn forecast(
    state: &AppState,
    headers: &HeaderMap,
    prediction_type: PredictionType,
    category_id: Option<String>,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let user_id = user_id(headers)?;
    let request = query_params(params)?
        .into_entry(user_id, prediction_type, category_id)
        .into_request()?;
    Ok(Json(state.service.predict(&request).await?))
}

pub async fn predict_income(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    forecast(&state, &headers, PredictionType::Income, None, params).await
}

pub async fn predict_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    forecast(&state, &headers, PredictionType::Expense, None, params).await
}

pub async fn predict_savings(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    forecast(&state, &headers, PredictionType::Savings, None, params).await
}

pub async fn predict_balance(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    forecast(&state, &headers, PredictionType::Balance, None, params).await
}

pub async fn predict_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(category_id): Path<String>,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    forecast(
        &state,
        &headers,
        PredictionType::Category,
        Some(category_id),
        params,
    )
    .await
}

/// One entry of a batch body; the user comes from the header.
#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub prediction_type: PredictionType,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(flatten)]
    pub params: ForecastParams,
}

/// Partial success still answers 200; failures are listed in the body.
pub async fn predict_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Vec<BatchItem>>, JsonRejection>,
) -> Result<Json<BatchResult>, ApiError> {
    let user_id = user_id(&headers)?;
    let entries = json_payload(body)?
        .into_iter()
        .map(|item| {
            item.params
                .into_entry(user_id.clone(), item.prediction_type, item.category_id)
        })
        .collect();
    Ok(Json(state.service.predict_entries(entries).await?))
}

// ============================================================================
// Anomalies
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub user_id: String,
    pub anomalies: Vec<AnomalyRecord>,
}

pub async fn detect_anomalies(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AnomalyResponse>, ApiError> {
    let user_id = user_id(&headers)?;
    let anomalies = state.service.detect_anomalies(&user_id).await?;
    Ok(Json(AnomalyResponse { user_id, anomalies }))
}

// ============================================================================
// Accuracy
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AccuracyParams {
    pub prediction_id: Option<Uuid>,
    pub limit: Option<usize>,
}

pub async fn list_accuracy(
    State(state): State<AppState>,
    params: Result<Query<AccuracyParams>, QueryRejection>,
) -> Result<Json<Vec<AccuracyRecord>>, ApiError> {
    let params = query_params(params)?;
    let records = state
        .service
        .list_accuracy(params.prediction_id, params.limit)
        .await?;
    Ok(Json(records))
}

pub async fn report_actual(
    State(state): State<AppState>,
    body: Result<Json<AccuracyReport>, JsonRejection>,
) -> Result<Json<AccuracyRecord>, ApiError> {
    let report = json_payload(body)?;
    Ok(Json(state.service.report_actual(&report).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct PerformanceParams {
    pub algorithm: Option<String>,
    pub prediction_type: Option<String>,
}

pub async fn list_performance(
    State(state): State<AppState>,
    params: Result<Query<PerformanceParams>, QueryRejection>,
) -> Result<Json<Vec<ModelPerformance>>, ApiError> {
    let params = query_params(params)?;
    let algorithm = params
        .algorithm
        .as_deref()
        .map(str::parse::<Algorithm>)
        .transpose()
        .map_err(PredictionServiceError::from)?;
    let prediction_type = params
        .prediction_type
        .as_deref()
        .map(str::parse::<PredictionType>)
        .transpose()?;
    let rows = state
        .service
        .list_performance(algorithm, prediction_type)
        .await?;
    Ok(Json(rows))
}
