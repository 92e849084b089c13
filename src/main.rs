//! Render service entry point.

use clap::Parser;
use tokio::net::TcpListener;

use render_service::config::{load_config, AppConfig};
use render_service::observability::{logging, metrics};
use render_service::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "render-service", about = "Server-side news page renderer")]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the configured bind address.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(std::path::Path::new(path))?,
        None => AppConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        services = config.services().len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(error) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %error,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
