use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use crate::peer::transport::{HEALTH_PATH, PeerTransport, peer_url};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a peer failed its liveness check. The `Display` text is what ends up
/// in the peer's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, malformed address or timeout.
    #[error("Peer is offline or not reachable")]
    Unreachable,

    #[error("Peer appears to be offline or not responding correctly. Status: {0}")]
    BadStatus(u16),
}

/// Bounded `GET <peer>/health` run before a remote query, so a dead peer
/// costs at most the probe timeout rather than the query timeout.
pub struct LivenessProbe {
    transport: Arc<dyn PeerTransport>,
    timeout: Duration,
}

impl LivenessProbe {
    pub fn new(transport: Arc<dyn PeerTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn probe(&self, peer_address: &str) -> Result<(), ProbeError> {
        let url = peer_url(peer_address, HEALTH_PATH);
        match timeout(self.timeout, self.transport.get(&url)).await {
            Ok(Ok(reply)) if reply.status == 200 => Ok(()),
            Ok(Ok(reply)) => {
                debug!(target: "lake_peer::probe", peer = peer_address, status = reply.status, "Health check returned non-200");
                Err(ProbeError::BadStatus(reply.status))
            }
            Ok(Err(e)) => {
                debug!(target: "lake_peer::probe", peer = peer_address, error = %e, "Health check failed");
                Err(ProbeError::Unreachable)
            }
            Err(_) => {
                debug!(target: "lake_peer::probe", peer = peer_address, timeout = ?self.timeout, "Health check timed out");
                Err(ProbeError::Unreachable)
            }
        }
    }
}
