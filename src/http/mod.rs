//! HTTP surface of the relay.
//!
//! # Data Flow
//! ```text
//! UI request
//!     → server.rs (Axum router, request ID, trace, timeout, body limit)
//!     → handlers.rs (one config snapshot, one forwarder per request)
//!     → proxy::ProxyForwarder (discover, probe, forward once)
//!     → response.rs (ProxyResult → JSON, fallback data, error envelope)
//!     → UI response
//!
//! Interceptor targets (/api/health, /api/generate-*, /api/direct-test)
//!     → mock.rs (compiled-in samples, no forwarding)
//! ```

pub mod handlers;
pub mod mock;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
