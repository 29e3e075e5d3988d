//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery / health / proxy / http
//!     → logging.rs (tracing events with port, endpoint, request_id fields)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG)
//!     → Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
