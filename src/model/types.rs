//! Completion service types and error definitions.

use thiserror::Error;

// Re-export ModelConfig from config module to avoid duplication
pub use crate::config::schema::ModelConfig;

/// Errors that can occur talking to the completion service.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The service answered with a non-success status (auth, quota, ...).
    #[error("completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection or protocol failure before a status was received.
    #[error("completion transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured timeout.
    #[error("completion request timed out after {0} seconds")]
    Timeout(u64),

    /// No credential is configured. Dispatchers check `is_configured()`
    /// first, so this surfaces only on direct misuse of the client.
    #[error("completion service not configured")]
    NotConfigured,

    /// The service replied without any candidate text.
    #[error("completion reply contained no text")]
    EmptyReply,
}

/// Result type for completion operations.
pub type ModelResult<T> = Result<T, ModelError>;
