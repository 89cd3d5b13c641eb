use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::DownstreamCheckResponse;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Why a downstream call produced no response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownstreamError {
    #[error("Request was cancelled")]
    Cancelled,

    #[error("Request timed out after {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for DownstreamError {
    fn from(err: reqwest::Error) -> Self {
        DownstreamError::Request(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Downstream check against {downstream_url} failed: {source}")]
    Downstream {
        downstream_url: String,
        source: DownstreamError,
    },

    #[error("Readiness toggle is disabled")]
    ToggleDisabled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Downstream {
                downstream_url,
                source,
            } => {
                let body = DownstreamCheckResponse::failed(downstream_url, source.to_string());
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
            ApiError::ToggleDisabled => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}
