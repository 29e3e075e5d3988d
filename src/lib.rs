//! Backend relay for the lesson-planning UI.
//!
//! Finds the locally running generation backend, checks that it is alive,
//! forwards UI requests to it and answers with sample data or a structured
//! error when it is not there.

pub mod client;
pub mod config;
pub mod discovery;
pub mod fallback;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::RelayConfig;
pub use discovery::{BackendAddress, PortLocator};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{ProxyForwarder, ProxyResult};
