pub mod context;
pub mod http;
pub mod server_state;


use context::FrontendContext;
use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::LocalQueryExecutor;
use crate::shared::config::Settings;

/// Serves the peer HTTP API until Ctrl-C, then drains and returns.
pub async fn start_all(
    settings: Arc<Settings>,
    executor: Arc<dyn LocalQueryExecutor>,
) -> anyhow::Result<()> {
    let ctx = FrontendContext::from_settings(settings, executor);

    let state = Arc::clone(&ctx.server_state);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!(target: "lake_peer::server", "Shutdown signal received");
                state.signal_shutdown();
            }
            Err(e) => warn!(target: "lake_peer::server", error = %e, "Cannot listen for Ctrl-C"),
        }
    });

    http::listener::run_http_server(ctx).await
}
