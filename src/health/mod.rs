//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! PortLocator result + conventional ports
//!     → prober.rs (GET /api/health per candidate, own deadline each)
//!     → first live BackendAddress, or None
//! ```
//!
//! Probes are one-shot and stateless: nothing is remembered between requests,
//! so a backend that restarts on a new port is picked up on the next call.

pub mod prober;

pub use prober::{http_client, HealthProber, HttpClient};
