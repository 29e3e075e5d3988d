//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and addresses.
//! Every problem is reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: port 0 is not a usable TCP port")]
    ZeroPort { field: &'static str },

    #[error("{field}: must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("probe.path: '{0}' must start with '/'")]
    RelativeProbePath(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::NonPositive { field: "listener.max_body_bytes" });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::NonPositive { field: "listener.request_timeout_secs" });
    }

    let discovery = &config.discovery;
    if discovery.host.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "discovery.host" });
    }
    if discovery.state_file.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "discovery.state_file" });
    }
    if discovery.default_port == 0 {
        errors.push(ValidationError::ZeroPort { field: "discovery.default_port" });
    }
    if discovery.fallback_ports.contains(&0) {
        errors.push(ValidationError::ZeroPort { field: "discovery.fallback_ports" });
    }

    if !config.probe.path.starts_with('/') {
        errors.push(ValidationError::RelativeProbePath(config.probe.path.clone()));
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::NonPositive { field: "probe.timeout_ms" });
    }
    if config.forward.timeout_ms == 0 {
        errors.push(ValidationError::NonPositive { field: "forward.timeout_ms" });
    }
    if config.forward.max_response_bytes == 0 {
        errors.push(ValidationError::NonPositive { field: "forward.max_response_bytes" });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_error() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.discovery.default_port = 0;
        config.probe.path = "api/health".into();
        config.forward.timeout_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroPort { field: "discovery.default_port" }));
        assert!(errors.contains(&ValidationError::RelativeProbePath("api/health".into())));
    }

    #[test]
    fn metrics_address_only_checked_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
