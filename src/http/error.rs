//! Error taxonomy for the HTTP boundary.
//!
//! Resolution ambiguity, empty content, and model degradation are expected
//! business outcomes; the dispatchers absorb them into result bodies before
//! they reach this type. Only `Internal` produces a server error status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::ledger::types::LedgerError;
use crate::model::types::ModelError;

/// Failure kinds a handler can propagate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Both interpretations of an identifier failed.
    #[error("resolution failed: {0}")]
    ResolutionFailure(String),

    /// The ledger node or completion service could not be reached.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The completion service replied with something unusable.
    #[error("malformed upstream reply: {0}")]
    MalformedReply(String),

    /// Unexpected internal fault. The only variant surfaced as HTTP 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Api { .. } => ApiError::ResolutionFailure(e.to_string()),
            LedgerError::Transport(_) | LedgerError::Timeout(_) => {
                ApiError::UpstreamUnavailable(e.to_string())
            }
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::EmptyReply => ApiError::MalformedReply(e.to_string()),
            _ => ApiError::UpstreamUnavailable(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal fault");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            // Expected upstream conditions stay user-visible outcomes even
            // when one escapes a handler without being absorbed.
            other => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "Unknown",
                    "reason": other.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
