use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

use backend_relay::client::{ClientInterceptor, ClientResponse, OutboundRequest, ReqwestTransport, Transport};
use backend_relay::config::{load_config, RelayConfig};
use backend_relay::health::{http_client, HealthProber};
use backend_relay::proxy::GenerationEndpoint;
use backend_relay::PortLocator;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Inspect backend discovery and exercise the relay", long_about = None)]
struct Cli {
    /// Relay base URL.
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Relay configuration file (discovery and probe settings).
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Client request timeout in seconds.
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which backend port discovery resolves to
    Port,
    /// Probe the candidate ports and report the first live backend
    Probe,
    /// Send a generation request through the relay
    Generate {
        /// generate-lesson, generate-rubric, generate-activities or generate-unit-plan
        endpoint: GenerationEndpoint,
        /// JSON request body
        #[arg(short, long, default_value = "{}")]
        body: String,
        /// Redirect proxy routes to the local mock endpoints
        #[arg(long)]
        mock: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    match cli.command {
        Commands::Port => {
            let locator = PortLocator::new(config.discovery);
            if locator.is_disabled() {
                println!("Backend discovery is disabled in this deployment mode");
                return Ok(());
            }
            let located = locator.locate();
            println!("port {} (from {})", located.port, located.source);
        }
        Commands::Probe => {
            let locator = PortLocator::new(config.discovery);
            let Some(addr) = locator.resolve() else {
                println!("Backend discovery is disabled in this deployment mode");
                return Ok(());
            };
            let prober = HealthProber::new(http_client(), &config.probe);
            let candidates = locator.candidate_ports(addr.port());
            match prober.scan(&addr, &candidates).await {
                Some(live) => println!("backend alive at {}", live.base_url()),
                None => {
                    eprintln!("No live backend on ports {:?}", candidates);
                    std::process::exit(1);
                }
            }
        }
        Commands::Generate { endpoint, body, mock } => {
            let payload: Value = serde_json::from_str(&body)?;
            let transport = Arc::new(ReqwestTransport::new(
                Url::parse(&cli.url)?,
                Duration::from_secs(cli.timeout),
            )?);
            let interceptor = ClientInterceptor::new(transport);
            if mock {
                interceptor.install();
            }

            let url = format!("/api/proxy/{}", endpoint);
            let response = interceptor.send(OutboundRequest::post_json(url, &payload)).await?;
            print_response(&response)?;
        }
    }

    Ok(())
}

fn print_response(response: &ClientResponse) -> Result<(), Box<dyn std::error::Error>> {
    if !response.status.is_success() {
        eprintln!("Error: relay returned status {}", response.status);
    }
    match response.json() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", String::from_utf8_lossy(&response.body)),
    }
    Ok(())
}
