use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::peer::outcome::PeerOutcome;
use crate::peer::transport::{PeerTransport, QUERY_PATH, TransportError, peer_url};
use crate::shared::wire::{QueryRequest, QueryResponse};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends one `POST <peer>/query` and turns whatever comes back into a
/// [`PeerOutcome`]. Exactly one attempt is made.
pub struct PeerQueryClient {
    transport: Arc<dyn PeerTransport>,
    timeout: Duration,
}

impl PeerQueryClient {
    pub fn new(transport: Arc<dyn PeerTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn query(&self, peer_address: &str, query: &str) -> PeerOutcome {
        let body = match serde_json::to_vec(&QueryRequest {
            query: query.to_string(),
        }) {
            Ok(body) => Bytes::from(body),
            Err(e) => return transport_failure(peer_address, e),
        };

        let url = peer_url(peer_address, QUERY_PATH);
        let reply = match timeout(self.timeout, self.transport.post_json(&url, body)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => return transport_failure(peer_address, e),
            Err(_) => {
                return transport_failure(peer_address, TransportError::Timeout(self.timeout));
            }
        };

        if reply.status != 200 {
            debug!(target: "lake_peer::client", peer = peer_address, status = reply.status, "Query returned non-200");
            return PeerOutcome::failure(
                peer_address,
                format!("HTTP {}: {}", reply.status, reply.text()),
            );
        }

        match serde_json::from_slice::<QueryResponse>(&reply.body) {
            Ok(response) => PeerOutcome::from_response(peer_address, response),
            Err(e) => transport_failure(peer_address, format!("invalid response body: {e}")),
        }
    }
}

fn transport_failure(peer_address: &str, cause: impl std::fmt::Display) -> PeerOutcome {
    debug!(target: "lake_peer::client", peer = peer_address, error = %cause, "Query failed");
    PeerOutcome::failure(peer_address, format!("Error querying peer: {cause}"))
}
