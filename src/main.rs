use anyhow::Context;
use clap::Parser;
use reverb::{CaptureStore, ReverbConfiguration, ReverbServer, DEFAULT_PORT};
use std::{net::IpAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "reverb")]
#[command(version, long_about = None)]
#[command(about = "Captures inbound HTTP requests for later inspection")]
struct Cli {
    /// An address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    addr: IpAddr,

    /// A port to bind to
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Reject captured bodies larger than this many bytes
    #[arg(long)]
    max_body_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut configuration = ReverbConfiguration::new();
    configuration.set_address(cli.addr);
    configuration.set_port(cli.port);
    configuration.set_max_body_size(cli.max_body_size);

    let storage = Arc::new(CaptureStore::new());
    let server = ReverbServer::bind(&configuration, storage)
        .with_context(|| format!("failed to bind {}", configuration.socket_addr()))?;

    tracing::info!("Listening on http://{}/", server.local_addr()?);

    server
        .serve_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("shutting down"),
                Err(error) => {
                    tracing::error!(%error, "failed to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    Ok(())
}
