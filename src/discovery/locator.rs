//! Backend port locator.
//!
//! Sources are consulted in a fixed order and the first one yielding a valid
//! port wins:
//!
//! ```text
//! state file  ──Found──▶ port
//!     │NotFound
//!     ▼
//! env var     ──Found──▶ port
//!     │NotFound
//!     ▼
//! default port
//! ```
//!
//! A missing, unreadable or invalid source is `NotFound`, never an error.
//! Nothing is cached: every call re-reads the file and the environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{DiscoveryConfig, DEFAULT_BACKEND_PORT};
use crate::discovery::address::{parse_port, BackendAddress};

/// Environment lookup used by the locator.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the real process environment.
pub fn process_env() -> EnvLookup {
    Arc::new(|key: &str| std::env::var(key).ok())
}

/// Outcome of consulting a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Found(u16),
    NotFound,
}

impl Discovery {
    fn from_raw(raw: Option<String>) -> Self {
        match raw.as_deref().and_then(parse_port) {
            Some(port) => Discovery::Found(port),
            None => Discovery::NotFound,
        }
    }

    pub fn port(self) -> Option<u16> {
        match self {
            Discovery::Found(port) => Some(port),
            Discovery::NotFound => None,
        }
    }
}

/// Where a port value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    StateFile(PathBuf),
    Environment(String),
    Default,
}

impl DiscoverySource {
    /// Consult this source.
    pub fn read(&self, env: &EnvLookup) -> Discovery {
        match self {
            DiscoverySource::StateFile(path) => read_state_file(path),
            DiscoverySource::Environment(var) => Discovery::from_raw(env(var)),
            DiscoverySource::Default => Discovery::NotFound,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiscoverySource::StateFile(_) => "state_file",
            DiscoverySource::Environment(_) => "environment",
            DiscoverySource::Default => "default",
        }
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverySource::StateFile(path) => write!(f, "state file {}", path.display()),
            DiscoverySource::Environment(var) => write!(f, "environment variable {}", var),
            DiscoverySource::Default => write!(f, "default port"),
        }
    }
}

fn read_state_file(path: &Path) -> Discovery {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let found = Discovery::from_raw(Some(content));
            if found == Discovery::NotFound {
                tracing::debug!(path = %path.display(), "Ignoring invalid port in state file");
            }
            found
        }
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "State file not readable");
            Discovery::NotFound
        }
    }
}

/// A port together with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub port: u16,
    pub source: DiscoverySource,
}

/// Determines which local port the backend is listening on.
#[derive(Clone)]
pub struct PortLocator {
    config: DiscoveryConfig,
    env: EnvLookup,
}

impl fmt::Debug for PortLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortLocator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PortLocator {
    /// Locator reading the process environment.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self::with_env(config, process_env())
    }

    /// Locator reading the environment through `env`.
    pub fn with_env(config: DiscoveryConfig, env: EnvLookup) -> Self {
        Self { config, env }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Ranked sources, highest precedence first. The default port is implied.
    pub fn sources(&self) -> [DiscoverySource; 2] {
        [
            DiscoverySource::StateFile(PathBuf::from(&self.config.state_file)),
            DiscoverySource::Environment(self.config.port_env_var.clone()),
        ]
    }

    fn default_port(&self) -> u16 {
        if self.config.default_port == 0 {
            DEFAULT_BACKEND_PORT
        } else {
            self.config.default_port
        }
    }

    /// True when the deployment mode says no backend can exist.
    pub fn is_disabled(&self) -> bool {
        let Some(mode) = (self.env)(&self.config.deployment_mode_var) else {
            return false;
        };
        let mode = mode.trim();
        self.config
            .disabled_modes
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(mode))
    }

    /// First valid port in precedence order, and where it came from.
    pub fn locate(&self) -> Located {
        for source in self.sources() {
            if let Discovery::Found(port) = source.read(&self.env) {
                tracing::debug!(port, source = source.name(), "Backend port located");
                return Located { port, source };
            }
        }
        let port = self.default_port();
        tracing::debug!(port, source = "default", "No port source available, using default");
        Located {
            port,
            source: DiscoverySource::Default,
        }
    }

    /// Always returns a usable port.
    pub fn resolve_port(&self) -> u16 {
        self.locate().port
    }

    /// Address of the backend, or `None` when discovery is disabled.
    pub fn resolve(&self) -> Option<BackendAddress> {
        if self.is_disabled() {
            tracing::debug!(
                var = %self.config.deployment_mode_var,
                "Backend discovery disabled by deployment mode"
            );
            return None;
        }
        BackendAddress::new(self.config.host.clone(), self.resolve_port())
    }

    /// Probe order for a scan: the located port, then the conventional
    /// fallbacks without duplicates.
    pub fn candidate_ports(&self, located: u16) -> Vec<u16> {
        let mut ports = Vec::with_capacity(self.config.fallback_ports.len() + 1);
        for port in std::iter::once(located).chain(self.config.fallback_ports.iter().copied()) {
            if port != 0 && !ports.contains(&port) {
                ports.push(port);
            }
        }
        ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> EnvLookup {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(move |key: &str| map.get(key).cloned())
    }

    fn locator_in(dir: &tempfile::TempDir, env: EnvLookup) -> PortLocator {
        let config = DiscoveryConfig {
            state_file: dir.path().join(".flask-port").display().to_string(),
            ..DiscoveryConfig::default()
        };
        PortLocator::with_env(config, env)
    }

    #[test]
    fn state_file_beats_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".flask-port"), "5400\n").unwrap();
        let locator = locator_in(&dir, env_of(&[("FLASK_SERVER_PORT", "5401")]));

        let located = locator.locate();
        assert_eq!(located.port, 5400);
        assert_eq!(located.source.name(), "state_file");
    }

    #[test]
    fn environment_used_without_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator_in(&dir, env_of(&[("FLASK_SERVER_PORT", "5401")]));
        assert_eq!(locator.resolve_port(), 5401);
    }

    #[test]
    fn default_when_nothing_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator_in(&dir, env_of(&[]));
        let located = locator.locate();
        assert_eq!(located.port, DEFAULT_BACKEND_PORT);
        assert_eq!(located.source, DiscoverySource::Default);
    }

    #[test]
    fn invalid_state_file_is_treated_as_missing() {
        for content in ["abc", "99999999", "", "0"] {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join(".flask-port"), content).unwrap();

            let with_env = locator_in(&dir, env_of(&[("FLASK_SERVER_PORT", "5401")]));
            assert_eq!(with_env.resolve_port(), 5401, "content {:?}", content);

            let without_env = locator_in(&dir, env_of(&[]));
            assert_eq!(without_env.resolve_port(), DEFAULT_BACKEND_PORT, "content {:?}", content);
        }
    }

    #[test]
    fn invalid_environment_falls_through_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator_in(&dir, env_of(&[("FLASK_SERVER_PORT", "http")]));
        assert_eq!(locator.resolve_port(), DEFAULT_BACKEND_PORT);
    }

    #[test]
    fn unreadable_state_file_is_absent() {
        // A directory where the file should be cannot be read as text.
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".flask-port")).unwrap();
        let locator = locator_in(&dir, env_of(&[]));
        assert_eq!(locator.resolve_port(), DEFAULT_BACKEND_PORT);
    }

    #[test]
    fn deployment_mode_disables_resolution() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".flask-port"), "5400").unwrap();

        let locator = locator_in(&dir, env_of(&[("DEPLOYMENT_MODE", "Preview")]));
        assert!(locator.is_disabled());
        assert!(locator.resolve().is_none());
        // The port itself is still reported.
        assert_eq!(locator.resolve_port(), 5400);

        let locator = locator_in(&dir, env_of(&[("DEPLOYMENT_MODE", "development")]));
        assert_eq!(locator.resolve().unwrap().port(), 5400);
    }

    #[test]
    fn candidates_are_deduplicated_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator_in(&dir, env_of(&[]));
        assert_eq!(locator.candidate_ports(5337), vec![5337, 5338, 5336, 5339, 5340, 5000]);
        assert_eq!(locator.candidate_ports(5338), vec![5338, 5336, 5337, 5339, 5340, 5000]);
    }
}
