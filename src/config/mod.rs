//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! relay.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via ArcSwap with the request handlers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → sent to the server, which swaps its snapshot
//! ```
//!
//! Config is immutable once loaded; every field has a default so an empty
//! file is a valid configuration.

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DiscoveryConfig, FallbackConfig, ForwardConfig, ListenerConfig, ObservabilityConfig,
    ProbeConfig, RelayConfig, CONVENTIONAL_PORTS, DEFAULT_BACKEND_PORT,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
