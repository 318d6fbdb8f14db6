use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::service::EstimateError;

/// JSON body returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub title: String,
    /// Canonical reason phrase of the HTTP status
    pub status: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Status for every estimate failure, whatever its kind
pub const ESTIMATE_FAILURE_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// API error with its HTTP status code mapping
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<EstimateError> for ApiError {
    fn from(err: EstimateError) -> Self {
        let status = ESTIMATE_FAILURE_STATUS;

        Self {
            status,
            body: ErrorResponse {
                message: err.message(),
                title: err.title().to_string(),
                status: status.canonical_reason().unwrap_or_default().to_string(),
                error_type: err.kind().to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
