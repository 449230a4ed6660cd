//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0, address parses)
//! - Check the route and log filter are usable before the host starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::HostConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("function.route '{0}' must start with '/'")]
    InvalidRoute(String),

    #[error("function.name must not be empty")]
    EmptyFunctionName,

    #[error("function.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("function.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let function = &config.function;
    if !function.route.starts_with('/') {
        errors.push(ValidationError::InvalidRoute(function.route.clone()));
    }
    if function.name.trim().is_empty() {
        errors.push(ValidationError::EmptyFunctionName);
    }
    if function.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if function.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
