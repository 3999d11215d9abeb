//! Completion service integration subsystem.
//!
//! # Constraints
//! - Credentials come from configuration/environment and are never logged
//! - A missing credential is not an error: dispatchers fall back to
//!   explicitly-marked demo output

pub mod client;
pub mod types;

pub use client::{Completion, ModelClient};
pub use types::{ModelError, ModelResult};
