//! Sentinel Relay Library

pub mod analysis;
pub mod config;
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod resolver;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
