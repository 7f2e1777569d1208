//! Unified error types for the profiles API
//!
//! This module defines error types for each layer:
//! - `FetchError`: upstream (Bitbucket / GitHub) transport errors
//! - `UnreachableError`: the one transport failure that aborts a collection
//! - `AppError`: Application layer errors rendered as HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Upstream could not be reached at all (connect error, timeout, reset).
#[derive(Debug, Clone, Error)]
#[error("Upstream unreachable at {url}: {message}")]
pub struct UnreachableError {
    pub url: String,
    pub message: String,
}

/// Upstream transport errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered but the request itself is bad (not found, bad
    /// status, unbuildable URL, body that isn't JSON).
    #[error("Invalid resource {url}: {reason}")]
    InvalidResource { url: String, reason: String },

    #[error(transparent)]
    Unreachable(#[from] UnreachableError),
}

impl FetchError {
    pub fn invalid(url: &str, reason: impl Into<String>) -> Self {
        FetchError::InvalidResource {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unreachable(url: &str, message: impl Into<String>) -> Self {
        FetchError::Unreachable(UnreachableError {
            url: url.to_string(),
            message: message.into(),
        })
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                tracing::debug!("Rejecting request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
