//! Error types for fetch operations
//!
//! Every upstream failure is one of the closed `FetchError` kinds. The cache
//! hands them back to its caller unchanged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failure of an upstream fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The fetch did not complete within the timeout
    #[error("Request timed out")]
    Timeout,

    /// The upstream could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The upstream answered with a payload that could not be decoded
    #[error("Malformed response: {0}")]
    DecodeError(String),

    /// The upstream answered with a non-success status
    #[error("Server error {code}: {reason}")]
    ServerError { code: u16, reason: String },

    /// Anything else
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Status code used when this error is surfaced by the HTTP API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            FetchError::ConnectionError(_)
            | FetchError::DecodeError(_)
            | FetchError::ServerError { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == reqwest Conversion ==
/// Transport failures only. Non-success statuses never reach this path; the
/// HTTP source maps them to `ServerError` itself.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            FetchError::DecodeError(err.to_string())
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
