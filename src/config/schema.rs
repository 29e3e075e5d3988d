//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Port the backend binds when nothing else says otherwise.
pub const DEFAULT_BACKEND_PORT: u16 = 5338;

/// Ports the backend has historically been started on, in probe order.
pub const CONVENTIONAL_PORTS: [u16; 6] = [5338, 5336, 5337, 5339, 5340, 5000];

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, limits).
    pub listener: ListenerConfig,

    /// Where and how to look for the backend port.
    pub discovery: DiscoveryConfig,

    /// Liveness probe settings.
    pub probe: ProbeConfig,

    /// Forwarding settings.
    pub forward: ForwardConfig,

    /// Fallback data policy.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum inbound request body size in bytes.
    pub max_body_bytes: usize,

    /// Total time allowed for one inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            request_timeout_secs: 30,
        }
    }
}

/// Backend port discovery.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Host the backend listens on.
    pub host: String,

    /// State file the backend writes its port into on startup.
    pub state_file: String,

    /// Environment variable holding a port override.
    pub port_env_var: String,

    /// Environment variable naming the deployment mode.
    pub deployment_mode_var: String,

    /// Deployment modes in which no backend can exist.
    pub disabled_modes: Vec<String>,

    /// Port used when every source is absent or invalid.
    pub default_port: u16,

    /// Ports probed after the located one.
    pub fallback_ports: Vec<u16>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            state_file: ".flask-port".to_string(),
            port_env_var: "FLASK_SERVER_PORT".to_string(),
            deployment_mode_var: "DEPLOYMENT_MODE".to_string(),
            disabled_modes: vec![
                "static".to_string(),
                "preview".to_string(),
                "production".to_string(),
            ],
            default_port: DEFAULT_BACKEND_PORT,
            fallback_ports: CONVENTIONAL_PORTS.to_vec(),
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path to probe on the backend.
    pub path: String,

    /// Per-candidate probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: "/api/health".to_string(),
            timeout_ms: 500,
        }
    }
}

/// Forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ForwardConfig {
    /// Upper bound for one forward call (connect + response body), in milliseconds.
    pub timeout_ms: u64,

    /// Confirm liveness with a probe scan before forwarding.
    pub probe_before_forward: bool,

    /// Largest backend response body accepted, in bytes.
    pub max_response_bytes: usize,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            probe_before_forward: true,
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Fallback data policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FallbackConfig {
    /// Serve sample data on read routes when the backend is unavailable.
    pub enabled: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_uses_defaults() {
        let config: RelayConfig = toml::from_str("[probe]\ntimeout_ms = 250\n").unwrap();
        assert_eq!(config.probe.timeout_ms, 250);
        assert_eq!(config.probe.path, "/api/health");
        assert_eq!(config.discovery.default_port, DEFAULT_BACKEND_PORT);
        assert_eq!(config.forward.timeout_ms, 2000);
    }

    #[test]
    fn fallback_ports_keep_order() {
        let config = RelayConfig::default();
        assert_eq!(config.discovery.fallback_ports, vec![5338, 5336, 5337, 5339, 5340, 5000]);
    }
}
