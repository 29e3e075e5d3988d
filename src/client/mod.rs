//! Client-side request layer.
//!
//! # Data Flow
//! ```text
//! client code
//!     → interceptor.rs (ordered URL rewrite rules, when installed)
//!     → transport.rs (reqwest, relative URLs resolved against a base)
//!     → network
//! ```
//!
//! Independent of discovery and forwarding: rewriting is purely pattern based.

pub mod interceptor;
pub mod transport;

pub use interceptor::{default_rules, rewrite_url, ClientInterceptor, InterceptionRule, DEFAULT_REDIRECTS};
pub use transport::{ClientResponse, OutboundRequest, ReqwestTransport, Transport, TransportError};
