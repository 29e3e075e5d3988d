//! Client interceptor over a real transport.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use backend_relay::client::{ClientInterceptor, OutboundRequest, ReqwestTransport, Transport};
use serde_json::json;
use url::Url;

mod common;

#[tokio::test]
async fn installed_interceptor_reaches_mock_endpoint() {
    let server = common::start_backend(Router::new().route(
        "/api/generate-activities",
        post(|| async { Json(json!({"success": true, "activities": [], "mock": true})) }),
    ))
    .await;

    let base = Url::parse(&format!("http://{}", server)).unwrap();
    let transport = Arc::new(ReqwestTransport::new(base, Duration::from_secs(2)).unwrap());
    let interceptor = ClientInterceptor::new(transport);
    let request = OutboundRequest::post_json("/api/proxy/generate-activities", &json!({"subject": "Art"}));

    // Nothing serves the proxy route on this server.
    let direct = interceptor.send(request.clone()).await.unwrap();
    assert_eq!(direct.status, StatusCode::NOT_FOUND);

    assert!(interceptor.install());
    let redirected = interceptor.send(request).await.unwrap();
    assert_eq!(redirected.status, StatusCode::OK);
    assert_eq!(redirected.json().unwrap()["mock"], true);
}

#[tokio::test]
async fn installed_interceptor_is_served_by_the_relay() {
    let dir = tempfile::tempdir().unwrap();
    let relay = common::start_relay(
        common::test_config(&dir.path().join(".flask-port")).await,
        common::env_of(&[]),
    )
    .await;

    let base = Url::parse(&relay.url("/")).unwrap();
    let transport = Arc::new(ReqwestTransport::new(base, Duration::from_secs(2)).unwrap());
    let interceptor = ClientInterceptor::new(transport);
    interceptor.install();

    let request = OutboundRequest::post_json(
        "/api/proxy/generate-activities",
        &json!({"subject": "Math", "grade": "4", "topic": "Fractions"}),
    );
    let generated = interceptor.send(request).await.unwrap();
    assert_eq!(generated.status, StatusCode::OK);
    let body = generated.json().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], body["activities"]);
    assert_eq!(body["activities"].as_array().unwrap().len(), 2);

    let lesson = interceptor
        .send(OutboundRequest::post_json(
            "/api/proxy/generate-lesson",
            &json!({"subject": "Science", "grade": "5", "topic": "Plants"}),
        ))
        .await
        .unwrap();
    assert_eq!(lesson.status, StatusCode::OK);
    assert_eq!(lesson.json().unwrap()["data"]["topic"], "Plants");

    let health = interceptor.send(OutboundRequest::get("/api/proxy/health")).await.unwrap();
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.json().unwrap()["status"], "ok");

    let direct = interceptor.send(OutboundRequest::get("/api/proxy/check-db")).await.unwrap();
    assert_eq!(direct.status, StatusCode::OK);
    assert_eq!(direct.json().unwrap()["success"], false);
}
