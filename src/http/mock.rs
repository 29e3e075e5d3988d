//! Local mock endpoints.
//!
//! The client interceptor redirects proxy routes to these paths. They answer
//! from compiled-in samples and never forward to the backend, except
//! `direct-test`, which only checks that it answers.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::discovery::BackendAddress;
use crate::fallback::{fallback_for, mock_lesson, DomainKind, MockRequest};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::normalize_collection;

fn mock_request(body: &Bytes) -> Result<MockRequest, String> {
    let request: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON body: {}", e))?;
    MockRequest::from_json(&request).map_err(|e| e.to_string())
}

/// `GET /api/health`, answered by the relay itself.
pub async fn relay_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/generate-activities`
pub async fn generate_activities(body: Bytes) -> Response {
    let start = Instant::now();
    let response = match mock_request(&body) {
        Ok(request) => {
            tracing::debug!(subject = %request.subject, topic = %request.topic, "Serving sample generated activities");
            metrics::record_fallback(DomainKind::GeneratedActivities.as_str());
            let payload = normalize_collection(
                json!({
                    "success": true,
                    "data": fallback_for(DomainKind::GeneratedActivities),
                    "message": "Sample generated activities",
                }),
                "activities",
            );
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(message) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "data": [], "activities": [], "message": message})),
        )
            .into_response(),
    };
    metrics::record_request("mock-generate-activities", response.status().as_u16(), start);
    response
}

/// `POST /api/generate-lesson`
pub async fn generate_lesson(body: Bytes) -> Response {
    let start = Instant::now();
    let response = match mock_request(&body) {
        Ok(request) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": mock_lesson(&request),
                "message": "Sample lesson plan",
            })),
        )
            .into_response(),
        Err(message) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "data": null, "message": message})),
        )
            .into_response(),
    };
    metrics::record_request("mock-generate-lesson", response.status().as_u16(), start);
    response
}

/// `GET /api/direct-test`: where discovery points and whether anything answers there.
pub async fn direct_test(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let config = state.snapshot();
    let forwarder = state.forwarder_for(&config);
    let locator = forwarder.locator();

    if locator.is_disabled() {
        metrics::record_request("direct-test", 200, start);
        return Json(json!({
            "success": false,
            "message": "Backend discovery is disabled in this deployment mode",
        }))
        .into_response();
    }

    let located = locator.locate();
    let Some(addr) = BackendAddress::new(locator.config().host.clone(), located.port) else {
        metrics::record_request("direct-test", 200, start);
        return Json(json!({"success": false, "port": located.port, "message": "Invalid backend port"})).into_response();
    };

    let checked = Instant::now();
    let alive = forwarder.prober().is_alive(&addr).await;
    let body = json!({
        "success": alive,
        "port": located.port,
        "source": located.source.name(),
        "url": addr.base_url(),
        "responseTimeMs": checked.elapsed().as_millis() as u64,
    });
    metrics::record_request("direct-test", 200, start);
    Json(body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn generated_activities_carry_both_names() {
        let body = Bytes::from_static(br#"{"subject":"Math","grade":"4","topic":"Fractions"}"#);
        let response = generate_activities(body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], body["activities"]);
        assert_eq!(body["data"][0]["id"], "gen-activity-1");
    }

    #[tokio::test]
    async fn incomplete_lesson_request_is_400() {
        let response = generate_lesson(Bytes::from_static(br#"{"subject":"Math"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], Value::Null);
    }
}
