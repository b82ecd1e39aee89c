/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream answered with a non-success HTTP status.
    #[error("HTTP {0}")]
    UpstreamStatus(u16),
    /// Connection refused, DNS failure, or timeout before a response arrived.
    #[error("Network error")]
    Network,
    /// Any other transport or decode failure.
    #[error("Request error: {0}")]
    Request(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Every upstream source failed for one query; nothing left to degrade to.
    #[error("All upstream sources failed: {0}")]
    AllUpstreamsFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify a reqwest failure into the transport taxonomy. Status-bearing
    /// errors keep their code; timeouts and connect failures are network
    /// errors; everything else carries its detail string.
    pub fn from_upstream(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::UpstreamStatus(status.as_u16());
        }
        if err.is_timeout() || err.is_connect() {
            return ApiError::Network;
        }
        ApiError::Request(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::from_upstream(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::UpstreamStatus(status) => match status {
                403 => "UPSTREAM_403",
                404 => "UPSTREAM_404",
                429 => "UPSTREAM_429",
                500..=599 => "UPSTREAM_5XX",
                _ => "UPSTREAM_ERROR",
            },
            ApiError::Network => "NETWORK_ERROR",
            ApiError::Request(_) => "REQUEST_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::AllUpstreamsFailed(_) => "ALL_UPSTREAMS_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        // Always HTTP 200 with ok=false; clients branch on the envelope.
        (StatusCode::OK, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
