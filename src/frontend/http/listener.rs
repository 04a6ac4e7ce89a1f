use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::frontend::context::FrontendContext;

use super::handler::handle_request;

const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

pub async fn run_http_server(ctx: Arc<FrontendContext>) -> anyhow::Result<()> {
    let addr = ctx.settings.server.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        target: "lake_peer::server",
        peer_id = %ctx.node.peer_id,
        advertised = %ctx.node.url(),
        "HTTP server running at http://{addr}/"
    );
    serve(listener, ctx).await
}

/// Accept loop over an already bound listener. Returns once the shutdown
/// flag is set and in-flight requests have drained or the grace period ran
/// out.
pub async fn serve(listener: TcpListener, ctx: Arc<FrontendContext>) -> anyhow::Result<()> {
    let server = &ctx.settings.server;
    let keep_alive = server.keep_alive;
    let connection_semaphore =
        (server.max_connections > 0).then(|| Arc::new(Semaphore::new(server.max_connections)));

    loop {
        if ctx.server_state.is_shutting_down() {
            info!(target: "lake_peer::server", "HTTP server shutting down, not accepting new connections");
            break;
        }

        // A full connection cap must not hide the shutdown flag.
        let permit = match &connection_semaphore {
            Some(semaphore) => tokio::select! {
                acquired = Arc::clone(semaphore).acquire_owned() => Some(acquired?),
                _ = wait_for_shutdown(&ctx) => {
                    info!(target: "lake_peer::server", "HTTP server shutting down while at connection limit");
                    break;
                }
            },
            None => None,
        };

        let accept_result = tokio::select! {
            result = listener.accept() => result,
            _ = wait_for_shutdown(&ctx) => {
                info!(target: "lake_peer::server", "HTTP server shutting down, stopping accept loop");
                break;
            }
        };

        let (stream, remote) = match accept_result {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(target: "lake_peer::server", error = %e, "Failed to accept HTTP connection");
                continue;
            }
        };
        debug!(target: "lake_peer::server", %remote, "Accepted connection");

        let io = TokioIo::new(stream);
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            let mut builder = hyper::server::conn::http1::Builder::new();
            builder.keep_alive(keep_alive);

            if let Err(err) = builder
                .serve_connection(
                    io,
                    service_fn(move |req| handle_request(req, Arc::clone(&ctx))),
                )
                .await
            {
                let text = err.to_string();
                if !text.contains("connection closed")
                    && !text.contains("broken pipe")
                    && !text.contains("Connection reset")
                {
                    warn!(target: "lake_peer::server", error = %text, "Error serving connection");
                }
            }
            drop(permit);
        });
    }

    drain(&ctx).await;
    info!(target: "lake_peer::server", "HTTP server shutdown complete");
    Ok(())
}

async fn wait_for_shutdown(ctx: &FrontendContext) {
    while !ctx.server_state.is_shutting_down() {
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
}

async fn drain(ctx: &FrontendContext) {
    let grace = ctx.settings.server.shutdown_grace();
    let state = &ctx.server_state;
    info!(
        target: "lake_peer::server",
        in_flight = state.in_flight_count(),
        "Waiting for active requests to complete"
    );
    let waited = tokio::time::timeout(grace, async {
        while state.in_flight_count() > 0 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    if waited.is_err() {
        warn!(
            target: "lake_peer::server",
            in_flight = state.in_flight_count(),
            "Grace period elapsed with requests still running"
        );
    }
}
