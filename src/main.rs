//! Local Development HTTP Server
//!
//! A static file server with an API reverse proxy, built with Tokio and Axum.
//!
//! Every inbound request goes through a single dispatcher:
//! - `OPTIONS` requests get an immediate CORS preflight answer
//! - paths under the proxy prefix are forwarded to the configured upstream
//!   with bodies streamed in both directions
//! - the health path reports a JSON status payload
//! - everything else resolves to a file under the content root

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devserver::config::{load_config, ServerConfig};
use devserver::{HttpServer, Shutdown};

/// Local development server: static files plus an API reverse proxy.
#[derive(Debug, Parser)]
#[command(name = "devserver", version)]
struct Cli {
    /// Path to a TOML configuration file (defaults used when omitted).
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Override the configured listen port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devserver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map_or("0.0.0.0", |(host, _)| host)
            .to_string();
        config.listener.bind_address = format!("{host}:{port}");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        content_root = %config.static_files.root.display(),
        proxy_enabled = config.proxy.enabled,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
