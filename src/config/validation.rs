//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all validation errors, not just the first, so an operator can fix
//! a config file in one pass.

use std::fmt;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "proxy.prefix").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: {:?}", config.listener.bind_address),
        ));
    }

    if config.static_files.index.is_empty() {
        errors.push(ValidationError::new(
            "static_files.index",
            "default document name must not be empty",
        ));
    }

    if config.static_files.root.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "static_files.root",
            "content root must not be empty",
        ));
    }

    if config.proxy.enabled {
        if !config.proxy.prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "proxy.prefix",
                format!("must start with '/': {:?}", config.proxy.prefix),
            ));
        }
        if config.proxy.upstream.parse::<axum::http::uri::Authority>().is_err() {
            errors.push(ValidationError::new(
                "proxy.upstream",
                format!("not a valid host:port authority: {:?}", config.proxy.upstream),
            ));
        }
    }

    if config.health.enabled && !config.health.path.starts_with('/') {
        errors.push(ValidationError::new(
            "health.path",
            format!("must start with '/': {:?}", config.health.path),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
