//! Ledger node types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export NodeConfig from config module to avoid duplication
pub use crate::config::schema::NodeConfig;

/// A Move module as returned by the node's account modules endpoint.
///
/// The node exposes the raw bytecode and, when available, a parsed ABI
/// document. Only the ABI is readable input for analysis; modules without
/// one are skipped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveModule {
    #[serde(default)]
    pub bytecode: Option<String>,

    /// ABI document, kept loosely typed: the relay forwards it as text and
    /// never interprets most of its fields.
    #[serde(default)]
    pub abi: Option<serde_json::Value>,
}

/// Errors that can occur talking to the ledger node.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node answered with a non-success status. The message is the
    /// node's own error text and is shown to callers verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection or protocol failure before a status was received.
    #[error("node transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured timeout.
    #[error("node request timed out after {0} seconds")]
    Timeout(u64),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
