//! Mapping forward outcomes to HTTP responses.
//!
//! The UI always gets JSON back: real data, fallback data, or an error
//! envelope `{success: false, error, message}`.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::fallback::fallback_for;
use crate::proxy::{normalize_collection, ProxyResult, ReadResource, UnavailableReason};

pub const BACKEND_NOT_AVAILABLE: &str = "Flask backend not available";
pub const BACKEND_UNREACHABLE: &str = "Failed to reach Flask backend";

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn error_response(status: StatusCode, error: &str, message: Option<String>) -> Response {
    let body = ErrorBody {
        success: false,
        error: error.to_string(),
        message,
    };
    (status, Json(body)).into_response()
}

/// 503 when there is no backend at all, 500 when one failed mid-request.
pub fn unavailable_response(reason: &UnavailableReason) -> Response {
    if reason.is_absent() {
        error_response(StatusCode::SERVICE_UNAVAILABLE, BACKEND_NOT_AVAILABLE, Some(reason.to_string()))
    } else {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, BACKEND_UNREACHABLE, Some(reason.to_string()))
    }
}

/// Backend status, content type and body, unchanged.
pub fn verbatim_response(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    response
}

/// Response for a generation route.
pub fn relay_response(result: ProxyResult) -> Response {
    match result {
        ProxyResult::Success(status, payload) => (status, Json(payload)).into_response(),
        ProxyResult::BackendUnavailable(reason) => unavailable_response(&reason),
        ProxyResult::BackendError(status, content_type, body) => verbatim_response(status, content_type, body),
    }
}

/// Sample data standing in for `resource` while the backend is unavailable.
pub fn fallback_response(resource: ReadResource, reason: &UnavailableReason) -> Response {
    let entries = fallback_for(resource.fallback_kind());
    let payload = normalize_collection(
        json!({
            "success": true,
            "data": entries,
            "fallback": true,
            "message": format!("Using fallback data: {}", reason),
        }),
        resource.legacy_alias(),
    );
    (StatusCode::OK, Json(payload)).into_response()
}
