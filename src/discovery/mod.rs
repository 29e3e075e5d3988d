//! Backend discovery subsystem.
//!
//! # Data Flow
//! ```text
//! .flask-port / FLASK_SERVER_PORT / default
//!     → locator.rs (first valid source wins)
//!     → address.rs (BackendAddress, port range checks)
//!     → health::prober (optional liveness scan)
//! ```

pub mod address;
pub mod locator;

pub use address::{parse_port, BackendAddress};
pub use locator::{process_env, Discovery, DiscoverySource, EnvLookup, Located, PortLocator};
