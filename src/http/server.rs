//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener
//! - Swap in reloaded configuration without restarting
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::routing::{any, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::discovery::{process_env, EnvLookup};
use crate::health::{http_client, HttpClient};
use crate::http::{handlers, mock};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::proxy::{GenerationEndpoint, ProxyForwarder, ReadResource};

const READ_RESOURCES: [ReadResource; 3] = [
    ReadResource::Activities,
    ReadResource::Rubrics,
    ReadResource::LessonPlans,
];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<RelayConfig>>,
    pub client: HttpClient,
    pub env: EnvLookup,
}

impl AppState {
    /// Current configuration. Handlers take one snapshot per request.
    pub fn snapshot(&self) -> Arc<RelayConfig> {
        self.config.load_full()
    }

    pub fn forwarder(&self) -> ProxyForwarder {
        self.forwarder_for(&self.snapshot())
    }

    pub fn forwarder_for(&self, config: &RelayConfig) -> ProxyForwarder {
        ProxyForwarder::new(self.client.clone(), config, self.env.clone())
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Server reading backend settings from the process environment.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_env(config, process_env())
    }

    /// Server with an explicit environment lookup.
    pub fn with_env(config: RelayConfig, env: EnvLookup) -> Self {
        let router_config = config.clone();
        let state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config)),
            client: http_client(),
            env,
        };
        let router = Self::build_router(&router_config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Listener limits are fixed here; reloads only affect discovery,
    /// probing, forwarding and fallback.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let mut router = Router::new();

        for endpoint in GenerationEndpoint::ALL {
            router = router.route(
                &format!("/api/proxy/{}", endpoint.as_str()),
                post(move |state: State<AppState>, headers: HeaderMap, body: Bytes| {
                    handlers::generate(state, headers, endpoint, body)
                }),
            );
        }

        for resource in READ_RESOURCES {
            router = router.route(
                &format!("/api/{}", resource.as_str()),
                get(move |state: State<AppState>, headers: HeaderMap| {
                    handlers::read_collection(state, headers, resource)
                }),
            );
        }

        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            // Timeout needs a `Default` response body, so it sits directly on the routes.
            .layer(TimeoutLayer::new(Duration::from_secs(config.listener.request_timeout_secs)));

        router
            .route("/api/proxy/health", get(handlers::backend_health))
            .route("/api/flask-port", get(handlers::backend_port))
            .route("/api/health", get(mock::relay_health))
            .route("/api/direct-test", get(mock::direct_test))
            .route("/api/generate-activities", post(mock::generate_activities))
            .route("/api/generate-lesson", post(mock::generate_lesson))
            .route("/api/proxy/{*path}", any(handlers::relay_any))
            .with_state(state)
            .layer(middleware)
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RelayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let live = self.state.config.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                tracing::info!(
                    state_file = %config.discovery.state_file,
                    forward_timeout_ms = config.forward.timeout_ms,
                    fallback = config.fallback.enabled,
                    "Applying reloaded configuration"
                );
                live.store(Arc::new(config));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get the current configuration.
    pub fn config(&self) -> Arc<RelayConfig> {
        self.state.snapshot()
    }
}
