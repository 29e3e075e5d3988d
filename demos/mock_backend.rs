//! Stand-in generation backend for trying the relay locally.
//!
//! Binds an ephemeral port, writes it to `.flask-port` the way the real
//! backend does, and answers the health and generation endpoints with
//! canned JSON. Run it next to the relay:
//!
//! ```text
//! cargo run --example mock_backend
//! cargo run -- --bind 127.0.0.1:3000
//! ```

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const STATE_FILE: &str = ".flask-port";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/api/generate-activities",
            post(|Json(request): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "activities": [{
                        "title": "Mock activity",
                        "subject": request.get("subject").cloned().unwrap_or(Value::Null),
                        "duration": "20 minutes",
                    }],
                }))
            }),
        )
        .route(
            "/api/generate-lesson",
            post(|Json(request): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "data": {"title": "Mock lesson", "request": request},
                }))
            }),
        )
        .route("/api/activities", get(|| async { Json(json!({"success": true, "activities": []})) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    std::fs::write(STATE_FILE, addr.port().to_string())?;
    println!("Mock backend listening on http://{} (port written to {})", addr, STATE_FILE);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    let _ = std::fs::remove_file(STATE_FILE);
    Ok(())
}
