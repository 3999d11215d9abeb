//! Ledger node integration subsystem.
//!
//! # Data Flow
//! ```text
//! RelayConfig.node (base URL, timeout)
//!     → client.rs (REST calls with timeouts)
//!     → types.rs (module/ABI payloads, typed errors)
//! ```
//!
//! # Constraints
//! - All node calls have configurable timeouts
//! - Node error messages are preserved verbatim: the resolver reports them
//!   to callers as the reason an identifier could not be resolved

pub mod client;
pub mod types;

pub use client::{LedgerApi, LedgerClient};
pub use types::{LedgerError, LedgerResult, MoveModule};
