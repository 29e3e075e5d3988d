//! Proxy forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound route
//!     → forwarder.rs (locate, probe, one bounded call)
//!     → normalize.rs (data / legacy alias mirroring)
//!     → result.rs (Success | BackendUnavailable | BackendError)
//!     → http::response (status + JSON envelope)
//! ```

pub mod endpoint;
pub mod forwarder;
pub mod normalize;
pub mod result;

pub use endpoint::{GenerationEndpoint, ReadResource, UnknownEndpoint};
pub use forwarder::ProxyForwarder;
pub use normalize::normalize_collection;
pub use result::{ProxyResult, UnavailableReason};
