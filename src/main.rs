//! Backend relay server.
//!
//! ```text
//!   UI ──▶ relay ──▶ discovery (.flask-port, FLASK_SERVER_PORT, default)
//!            │            │
//!            │            ▼
//!            │        probe /api/health on candidate ports
//!            │            │
//!            ▼            ▼
//!   UI ◀── JSON ◀── forward once, or fallback data / error envelope
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use backend_relay::config::{load_config, ConfigWatcher, RelayConfig};
use backend_relay::lifecycle::{wait_for_signal, Shutdown};
use backend_relay::observability::{logging, metrics};
use backend_relay::HttpServer;

#[derive(Parser)]
#[command(name = "backend-relay")]
#[command(about = "Relays UI requests to the locally running generation backend", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when absent.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "backend-relay starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        state_file = %config.discovery.state_file,
        default_port = config.discovery.default_port,
        forward_timeout_ms = config.forward.timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher handle must outlive the server.
    let (config_updates, _watcher) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            (updates, Some(handle))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut serve = tokio::spawn(server.run(listener, config_updates, shutdown.subscribe()));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.trigger();
            serve.await??;
        }
        result = &mut serve => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
