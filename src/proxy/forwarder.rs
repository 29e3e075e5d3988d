//! Forwarding of requests to the discovered backend.
//!
//! # Responsibilities
//! - Resolve the backend address (locator, then an optional probe scan)
//! - Issue exactly one HTTP call per request, bounded by a deadline
//! - Classify the outcome into a `ProxyResult`
//! - Normalize known response shape variants
//!
//! Retries are the caller's business; a failed or timed-out call is reported,
//! never repeated.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, Response, StatusCode};
use hyper::body::Incoming;
use serde_json::Value;
use tokio::time;

use crate::config::RelayConfig;
use crate::discovery::{BackendAddress, EnvLookup, PortLocator};
use crate::health::{HealthProber, HttpClient};
use crate::proxy::endpoint::{GenerationEndpoint, ReadResource};
use crate::proxy::normalize::normalize_collection;
use crate::proxy::result::{ProxyResult, UnavailableReason};

/// Request headers that describe the inbound hop and must not be relayed.
const HOP_HEADERS: [header::HeaderName; 5] = [
    header::HOST,
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Stateless relay to the backend. Cheap to build per request.
#[derive(Clone)]
pub struct ProxyForwarder {
    client: HttpClient,
    locator: PortLocator,
    prober: HealthProber,
    timeout: Duration,
    probe_first: bool,
    max_response_bytes: usize,
}

impl ProxyForwarder {
    pub fn new(client: HttpClient, config: &RelayConfig, env: EnvLookup) -> Self {
        Self {
            prober: HealthProber::new(client.clone(), &config.probe),
            locator: PortLocator::with_env(config.discovery.clone(), env),
            client,
            timeout: Duration::from_millis(config.forward.timeout_ms),
            probe_first: config.forward.probe_before_forward,
            max_response_bytes: config.forward.max_response_bytes,
        }
    }

    pub fn locator(&self) -> &PortLocator {
        &self.locator
    }

    pub fn prober(&self) -> &HealthProber {
        &self.prober
    }

    /// Address to forward to, or why there is none.
    pub async fn target(&self) -> Result<BackendAddress, UnavailableReason> {
        let addr = self.locator.resolve().ok_or(UnavailableReason::NotConfigured)?;
        if !self.probe_first {
            return Ok(addr);
        }
        let candidates = self.locator.candidate_ports(addr.port());
        self.prober
            .scan(&addr, &candidates)
            .await
            .ok_or(UnavailableReason::NoLiveBackend)
    }

    /// `POST /api/{endpoint}` with `body` as JSON.
    pub async fn forward(&self, endpoint: GenerationEndpoint, body: &Value) -> ProxyResult {
        let addr = match self.target().await {
            Ok(addr) => addr,
            Err(reason) => return ProxyResult::BackendUnavailable(reason),
        };

        let request = Request::builder()
            .method(Method::POST)
            .uri(addr.url_for(&endpoint.backend_path()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()));
        let request = match request {
            Ok(req) => req,
            Err(e) => return ProxyResult::BackendUnavailable(UnavailableReason::Unreachable(e.to_string())),
        };

        tracing::info!(endpoint = %endpoint, addr = %addr, "Forwarding generation request");
        let result = self.exchange_json(request, endpoint.legacy_alias()).await;
        log_outcome(endpoint.as_str(), &addr, &result);
        result
    }

    /// `GET /api/{resource}`.
    pub async fn fetch(&self, resource: ReadResource) -> ProxyResult {
        let addr = match self.target().await {
            Ok(addr) => addr,
            Err(reason) => return ProxyResult::BackendUnavailable(reason),
        };

        let request = Request::builder()
            .method(Method::GET)
            .uri(addr.url_for(&resource.backend_path()))
            .header(header::ACCEPT, "application/json")
            .body(Body::empty());
        let request = match request {
            Ok(req) => req,
            Err(e) => return ProxyResult::BackendUnavailable(UnavailableReason::Unreachable(e.to_string())),
        };

        let result = self.exchange_json(request, Some(resource.legacy_alias())).await;
        log_outcome(resource.as_str(), &addr, &result);
        result
    }

    /// Relay an arbitrary request to `/api/{path}` and hand back the
    /// backend's response untouched apart from hop-by-hop headers.
    pub async fn forward_raw(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response<Body>, UnavailableReason> {
        let addr = self.target().await?;
        let uri = addr.url_for(&format!("/api/{}", path_and_query.trim_start_matches('/')));

        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(out) = builder.headers_mut() {
            for (name, value) in headers {
                if !HOP_HEADERS.contains(name) {
                    out.append(name.clone(), value.clone());
                }
            }
        }
        let request = builder
            .body(Body::from(body))
            .map_err(|e| UnavailableReason::Unreachable(e.to_string()))?;

        tracing::debug!(addr = %addr, path = %path_and_query, "Relaying request");
        let (status, mut response_headers, bytes) = self.exchange(request).await?;
        for name in &HOP_HEADERS {
            response_headers.remove(name);
        }

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }

    async fn exchange(
        &self,
        request: Request<Body>,
    ) -> Result<(StatusCode, HeaderMap, Bytes), UnavailableReason> {
        let limit = self.max_response_bytes;
        let call = async {
            let response: Response<Incoming> = self
                .client
                .request(request)
                .await
                .map_err(|e| UnavailableReason::Unreachable(e.to_string()))?;
            let (parts, body) = response.into_parts();
            let bytes = axum::body::to_bytes(Body::new(body), limit)
                .await
                .map_err(|e| UnavailableReason::Unreachable(e.to_string()))?;
            Ok::<_, UnavailableReason>((parts.status, parts.headers, bytes))
        };

        match time::timeout(self.timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(UnavailableReason::Timeout(self.timeout)),
        }
    }

    async fn exchange_json(&self, request: Request<Body>, alias: Option<&str>) -> ProxyResult {
        let (status, headers, bytes) = match self.exchange(request).await {
            Ok(parts) => parts,
            Err(reason) => return ProxyResult::BackendUnavailable(reason),
        };

        if !status.is_success() {
            let content_type = headers.get(header::CONTENT_TYPE).cloned();
            return ProxyResult::BackendError(status, content_type, bytes);
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(payload) => ProxyResult::Success(status, match alias {
                Some(alias) => normalize_collection(payload, alias),
                None => payload,
            }),
            Err(e) => ProxyResult::BackendUnavailable(UnavailableReason::MalformedResponse(e.to_string())),
        }
    }
}

fn log_outcome(endpoint: &str, addr: &BackendAddress, result: &ProxyResult) {
    match result {
        ProxyResult::Success(status, _) => {
            tracing::info!(endpoint, addr = %addr, status = %status, "Backend answered");
        }
        ProxyResult::BackendError(status, ..) => {
            tracing::warn!(endpoint, addr = %addr, status = %status, "Backend returned an error status");
        }
        ProxyResult::BackendUnavailable(reason) => {
            tracing::error!(endpoint, addr = %addr, reason = %reason, "Backend unavailable");
        }
    }
}
