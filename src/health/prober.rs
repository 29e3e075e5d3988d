//! Bounded-time liveness probing.
//!
//! # Responsibilities
//! - Probe one candidate address with a hard deadline
//! - Scan an ordered list of ports and report the first live one

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Method, Request};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::time;

use crate::config::ProbeConfig;
use crate::discovery::BackendAddress;
use crate::observability::metrics;

/// HTTP client shared by the prober and the forwarder.
pub type HttpClient = Client<HttpConnector, Body>;

/// Build the plain-HTTP client used for backend traffic.
pub fn http_client() -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.set_nodelay(true);
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(connector)
}

/// Issues liveness checks against candidate backends.
#[derive(Clone)]
pub struct HealthProber {
    client: HttpClient,
    path: String,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(client: HttpClient, config: &ProbeConfig) -> Self {
        Self {
            client,
            path: config.path.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe with the configured timeout.
    pub async fn is_alive(&self, addr: &BackendAddress) -> bool {
        self.is_alive_within(addr, self.timeout).await
    }

    /// True only for a 2xx answer received before `timeout` expires.
    pub async fn is_alive_within(&self, addr: &BackendAddress, timeout: Duration) -> bool {
        let request = match Request::builder()
            .method(Method::GET)
            .uri(addr.url_for(&self.path))
            .header("user-agent", "backend-relay-probe")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(addr = %addr, error = %e, "Failed to build health probe request");
                return false;
            }
        };

        let started = Instant::now();
        let alive = match time::timeout(timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                let success = response.status().is_success();
                if !success {
                    tracing::debug!(addr = %addr, status = %response.status(), "Probe failed: non-success status");
                }
                success
            }
            Ok(Err(e)) => {
                tracing::debug!(addr = %addr, error = %e, "Probe failed: connection error");
                false
            }
            Err(_) => {
                tracing::debug!(addr = %addr, timeout_ms = timeout.as_millis() as u64, "Probe failed: timeout");
                false
            }
        };

        metrics::record_probe(addr.port(), alive, started);
        alive
    }

    /// Probe `ports` in order on `base`'s host; first live address wins.
    pub async fn scan(&self, base: &BackendAddress, ports: &[u16]) -> Option<BackendAddress> {
        for &port in ports {
            let Some(candidate) = base.with_port(port) else {
                continue;
            };
            if self.is_alive(&candidate).await {
                tracing::debug!(addr = %candidate, "Live backend found");
                return Some(candidate);
            }
        }
        tracing::warn!(host = %base.host(), candidates = ?ports, "No live backend on any candidate port");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        port
    }

    async fn dead_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    fn prober(timeout_ms: u64) -> HealthProber {
        let config = ProbeConfig {
            timeout_ms,
            ..ProbeConfig::default()
        };
        HealthProber::new(http_client(), &config)
    }

    #[tokio::test]
    async fn live_backend_is_alive() {
        let port = spawn(Router::new().route("/api/health", get(|| async { "{\"status\":\"healthy\"}" }))).await;
        let addr = BackendAddress::new("127.0.0.1", port).unwrap();
        assert!(prober(500).is_alive(&addr).await);
    }

    #[tokio::test]
    async fn non_success_status_is_dead() {
        let port = spawn(Router::new().route(
            "/api/health",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        ))
        .await;
        let addr = BackendAddress::new("127.0.0.1", port).unwrap();
        assert!(!prober(500).is_alive(&addr).await);
    }

    #[tokio::test]
    async fn non_listening_port_fails_within_timeout() {
        let addr = BackendAddress::new("127.0.0.1", dead_port().await).unwrap();
        let started = Instant::now();
        assert!(!prober(500).is_alive(&addr).await);
        assert!(started.elapsed() <= Duration::from_millis(550));
    }

    #[tokio::test]
    async fn hanging_backend_fails_within_timeout() {
        let port = spawn(Router::new().route(
            "/api/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        ))
        .await;
        let addr = BackendAddress::new("127.0.0.1", port).unwrap();
        let started = Instant::now();
        assert!(!prober(200).is_alive(&addr).await);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed <= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn scan_returns_first_live_candidate() {
        let live = spawn(Router::new().route("/api/health", get(|| async { "ok" }))).await;
        let dead = dead_port().await;
        let base = BackendAddress::new("127.0.0.1", dead).unwrap();

        let found = prober(300).scan(&base, &[dead, live]).await.unwrap();
        assert_eq!(found.port(), live);

        assert!(prober(300).scan(&base, &[dead]).await.is_none());
    }
}
