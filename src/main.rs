use anyhow::Context;
use clap::Parser;
use lake_peer::engine::MemoryEngine;
use lake_peer::frontend::start_all;
use lake_peer::logging;
use lake_peer::shared::config::load_settings;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "lake_peer")]
#[command(about = "Data lake peer with multi-peer query coordination")]
#[command(
    long_about = "Data lake peer with multi-peer query coordination.\n\n\
The built-in in-memory engine starts with no tables and has no file ingestion; \
tables are registered programmatically through the library API."
)]
struct Args {
    /// Configuration file (defaults to $LAKE_PEER_CONFIG, then ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on; also names the node peer_<port - 8000>
    #[arg(short, long)]
    port: Option<u16>,

    /// Explicit node identifier
    #[arg(long)]
    peer_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("Failed to load settings")?;
    settings.server.apply_overrides(args.port, args.peer_id);

    logging::init(&settings.logging).context("Failed to initialize logging")?;
    info!(
        target: "lake_peer::server",
        peer_id = %settings.server.peer_id,
        port = settings.server.port,
        "Peer is starting..."
    );

    let engine = Arc::new(MemoryEngine::new());
    start_all(Arc::new(settings), engine).await
}
