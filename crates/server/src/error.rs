//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prediction_facade::{ErrorKind, PredictionServiceError};
use serde::Serialize;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// The engine rejected the request or could not reach a collaborator
    Service(PredictionServiceError),
    /// The caller did not identify itself
    MissingUser,
}

/// JSON body returned on error
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::UnsupportedAlgorithm => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCategory | ErrorKind::PredictionNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InsufficientData | ErrorKind::ModelFit | ErrorKind::ModelFitTimeout => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::Service(e) => match e.kind() {
                Some(kind) => (status_for_kind(kind), kind.as_str(), e.to_string()),
                None => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    e.to_string(),
                ),
            },
            ApiError::MissingUser => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "missing x-user-id header".to_string(),
            ),
        };
        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        }
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<PredictionServiceError> for ApiError {
    fn from(error: PredictionServiceError) -> Self {
        ApiError::Service(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_kinds_are_client_errors() {
        for kind in [
            ErrorKind::InsufficientData,
            ErrorKind::InvalidCategory,
            ErrorKind::UnsupportedAlgorithm,
            ErrorKind::ModelFit,
            ErrorKind::ModelFitTimeout,
            ErrorKind::PredictionNotFound,
            ErrorKind::Validation,
        ] {
            assert!(status_for_kind(kind).is_client_error(), "{kind}");
        }
    }

    #[test]
    fn test_infrastructure_is_unavailable() {
        let response =
            ApiError::from(PredictionServiceError::Infrastructure("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
