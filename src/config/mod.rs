//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → client handles constructed once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the relay runs with no config file at all
//! - Credentials come from the environment, never logged

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ModelConfig;
pub use schema::NodeConfig;
pub use schema::RelayConfig;
