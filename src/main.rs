//! API service entry point.
//!
//! # Startup Order
//!
//! ```text
//! Parse CLI → init tracing → validate configuration (fail fast)
//!     → build state → bind listener → serve
//! ```
//!
//! The configuration gate runs before the listener binds: with any
//! required key missing, the process exits non-zero having served zero
//! requests.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_service::config::source::{ConfigSource, EnvSource};
use api_service::config::validation::validate;
use api_service::http::server::{AppState, HttpServer};
use api_service::lifecycle::{signals, Shutdown};
use api_service::observability::logging::{LogEmitter, UNKNOWN_REQUEST_ID};
use api_service::observability::metrics;
use api_service::SERVICE_NAME;

#[derive(Parser, Debug)]
#[command(name = "api-service", about = "Correlation-aware API service")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    metrics_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("api-service v0.1.0 starting");

    let emitter = LogEmitter::stdout(SERVICE_NAME);
    let source: Arc<dyn ConfigSource> = Arc::new(EnvSource);

    // Fail-fast configuration gate: no route serves until this passes.
    let config = match validate(source.as_ref(), &emitter) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration validation failed");
            std::process::exit(1);
        }
    };

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr);
    }

    emitter.info(
        "Application starting",
        UNKNOWN_REQUEST_ID,
        json!({
            "port": cli.port,
            "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "unknown".into()),
        }),
    );

    let state = AppState::new(config, source, emitter);
    let listener = TcpListener::bind((cli.host.as_str(), cli.port)).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::listen(&shutdown).await;
    });

    let server = HttpServer::new(state);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
