//! Semantic validation of loaded configuration.
//!
//! Serde handles the syntactic layer; this module checks that the values
//! make sense together before the relay starts.

use url::Url;

use crate::config::schema::RelayConfig;

/// A single failed validation check.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every failed check.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a socket address", config.listener.bind_address),
        });
    }

    if let Err(e) = Url::parse(&config.node.base_url) {
        errors.push(ValidationError {
            field: "node.base_url",
            message: e.to_string(),
        });
    }

    if let Err(e) = Url::parse(&config.model.base_url) {
        errors.push(ValidationError {
            field: "model.base_url",
            message: e.to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.node.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "node.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.model.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "model.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
