//! Route handlers.
//!
//! Each handler takes one configuration snapshot, builds a forwarder from it
//! and turns the outcome into a response. Handlers never retry.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::discovery::PortLocator;
use crate::http::request::request_id;
use crate::http::response::{error_response, fallback_response, relay_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::{GenerationEndpoint, ProxyResult, ReadResource};

/// `POST /api/proxy/{endpoint}`
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    endpoint: GenerationEndpoint,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let request: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(request_id = %request_id, endpoint = %endpoint, error = %e, "Rejecting non-JSON body");
            metrics::record_request(endpoint.as_str(), 400, start);
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body", Some(e.to_string()));
        }
    };

    let result = state.forwarder().forward(endpoint, &request).await;
    metrics::record_forward(endpoint.as_str(), result.outcome());
    if let ProxyResult::BackendUnavailable(reason) = &result {
        tracing::warn!(request_id = %request_id, endpoint = %endpoint, reason = %reason, "Backend unavailable");
    }

    let response = relay_response(result);
    metrics::record_request(endpoint.as_str(), response.status().as_u16(), start);
    response
}

/// `GET /api/{resource}`, served from sample data when the backend is away.
pub async fn read_collection(
    State(state): State<AppState>,
    headers: HeaderMap,
    resource: ReadResource,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let config = state.snapshot();

    let result = state.forwarder_for(&config).fetch(resource).await;
    metrics::record_forward(resource.as_str(), result.outcome());

    let response = match result {
        ProxyResult::BackendUnavailable(reason) if config.fallback.enabled => {
            tracing::info!(
                request_id = %request_id,
                resource = resource.as_str(),
                reason = %reason,
                "Serving fallback data"
            );
            metrics::record_fallback(resource.fallback_kind().as_str());
            fallback_response(resource, &reason)
        }
        other => relay_response(other),
    };
    metrics::record_request(resource.as_str(), response.status().as_u16(), start);
    response
}

/// `GET /api/proxy/health`
pub async fn backend_health(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let forwarded = state
        .forwarder()
        .forward_raw(Method::GET, "health", &HeaderMap::new(), Bytes::new())
        .await;

    let response = match forwarded {
        Ok(response) => response,
        Err(reason) => {
            tracing::warn!(request_id = %request_id(&headers), reason = %reason, "Backend health check failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to connect to Flask API",
                Some(reason.to_string()),
            )
        }
    };
    metrics::record_request("proxy-health", response.status().as_u16(), start);
    response
}

/// `GET /api/flask-port`
pub async fn backend_port(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let config = state.snapshot();
    let locator = PortLocator::with_env(config.discovery.clone(), state.env.clone());

    let body = if locator.is_disabled() {
        json!({
            "success": false,
            "message": "Backend discovery is disabled in this deployment mode",
        })
    } else {
        let located = locator.locate();
        json!({
            "success": true,
            "port": located.port,
            "source": located.source.name(),
        })
    };
    metrics::record_request("flask-port", 200, start);
    Json(body).into_response()
}

const PASSTHROUGH_PREFIX: &str = "/api/proxy/";

/// Path after the proxy prefix, still percent-encoded.
fn passthrough_path(uri: &Uri) -> &str {
    let path = uri.path();
    path.strip_prefix(PASSTHROUGH_PREFIX).unwrap_or(path)
}

/// `ANY /api/proxy/{*path}`, relayed verbatim to `/api/{path}`.
pub async fn relay_any(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let config = state.snapshot();
    let (parts, body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();

    let body = match axum::body::to_bytes(body, config.listener.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            metrics::record_request("proxy-passthrough", 413, start);
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large", Some(e.to_string()));
        }
    };

    let path = passthrough_path(&parts.uri);
    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %path_and_query,
        "Relaying request"
    );

    let forwarded = state
        .forwarder_for(&config)
        .forward_raw(parts.method, &path_and_query, &parts.headers, body)
        .await;

    let response = match forwarded {
        Ok(response) => response,
        Err(reason) if reason.is_absent() => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "No working Flask API server found", Some(reason.to_string()))
        }
        Err(reason) => {
            tracing::error!(request_id = %request_id, reason = %reason, "Relay failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error proxying request to Flask API",
                Some(reason.to_string()),
            )
        }
    };
    metrics::record_request("proxy-passthrough", response.status().as_u16(), start);
    response
}
