//! Batch outcome types.

use serde::{Deserialize, Serialize};

use super::{PredictionRequest, PredictionResult};
use crate::error::{ErrorKind, PredictionServiceError};

/// A batch item that failed, with its position in the submitted batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemFailure {
    pub index: usize,
    pub request: PredictionRequest,
    /// `None` for infrastructure failures
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl BatchItemFailure {
    pub fn new(index: usize, request: PredictionRequest, error: &PredictionServiceError) -> Self {
        Self {
            index,
            request,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// One submitted batch item: a request to run, or one already rejected
/// while it was decoded (an unknown algorithm name, say).
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEntry {
    Request(PredictionRequest),
    Rejected {
        request: PredictionRequest,
        error: PredictionServiceError,
    },
}

impl BatchEntry {
    pub fn request(&self) -> &PredictionRequest {
        match self {
            BatchEntry::Request(request) | BatchEntry::Rejected { request, .. } => request,
        }
    }

    /// The request to run, or the error it was rejected with.
    pub fn into_request(self) -> Result<PredictionRequest, PredictionServiceError> {
        match self {
            BatchEntry::Request(request) => Ok(request),
            BatchEntry::Rejected { error, .. } => Err(error),
        }
    }
}

impl From<PredictionRequest> for BatchEntry {
    fn from(request: PredictionRequest) -> Self {
        BatchEntry::Request(request)
    }
}

/// Partial-success outcome: one item's failure never hides its siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<PredictionResult>,
    pub failed: Vec<BatchItemFailure>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}
