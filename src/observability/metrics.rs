//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by route, status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_forward_total` (counter): forward outcomes by endpoint
//! - `relay_backend_probe_total` (counter): probes by port and result
//! - `relay_backend_probe_duration_seconds` (histogram): probe latency
//! - `relay_fallback_served_total` (counter): fallback responses by kind
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("relay_requests_total", "route" => route, "status" => status.to_string()).increment(1);
    histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_forward(endpoint: &'static str, outcome: &'static str) {
    counter!("relay_forward_total", "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

pub fn record_probe(port: u16, alive: bool, start: Instant) {
    let result = if alive { "alive" } else { "dead" };
    counter!("relay_backend_probe_total", "port" => port.to_string(), "result" => result).increment(1);
    histogram!("relay_backend_probe_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_fallback(kind: &'static str) {
    counter!("relay_fallback_served_total", "kind" => kind).increment(1);
}
