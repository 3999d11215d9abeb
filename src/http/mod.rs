//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, shared client handles)
//!     → handlers.rs (parse body, drive resolver/dispatchers)
//!     → error.rs (typed failure kinds; only Internal becomes a 500)
//!     → JSON response
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
