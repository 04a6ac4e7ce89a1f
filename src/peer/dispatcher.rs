use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::engine::LocalQueryExecutor;
use crate::peer::address::{AddressKind, classify};
use crate::peer::aggregator::{AggregateResult, aggregate};
use crate::peer::client::{DEFAULT_QUERY_TIMEOUT, PeerQueryClient};
use crate::peer::node::LocalNode;
use crate::peer::outcome::PeerOutcome;
use crate::peer::probe::{DEFAULT_PROBE_TIMEOUT, LivenessProbe};
use crate::peer::transport::PeerTransport;
use crate::shared::config::PeersConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerTimeouts {
    pub probe: Duration,
    pub query: Duration,
}

impl Default for PeerTimeouts {
    fn default() -> Self {
        Self {
            probe: DEFAULT_PROBE_TIMEOUT,
            query: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl From<&PeersConfig> for PeerTimeouts {
    fn from(cfg: &PeersConfig) -> Self {
        Self {
            probe: cfg.probe_timeout(),
            query: cfg.query_timeout(),
        }
    }
}

/// Strips surrounding whitespace and then exactly one trailing `;`.
pub fn normalize_query(query: &str) -> &str {
    let trimmed = query.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed)
}

/// Routes a query to each requested peer in turn.
///
/// Peers are handled strictly one after another: peer `k + 1` is not
/// contacted until peer `k` has produced its outcome, so the latency of a
/// request is the sum of its per-peer latencies. A failing peer never stops
/// the peers after it.
pub struct Dispatcher {
    node: LocalNode,
    executor: Arc<dyn LocalQueryExecutor>,
    probe: LivenessProbe,
    client: PeerQueryClient,
}

impl Dispatcher {
    pub fn new(
        node: LocalNode,
        executor: Arc<dyn LocalQueryExecutor>,
        transport: Arc<dyn PeerTransport>,
        timeouts: PeerTimeouts,
    ) -> Self {
        Self {
            node,
            executor,
            probe: LivenessProbe::new(Arc::clone(&transport), timeouts.probe),
            client: PeerQueryClient::new(transport, timeouts.query),
        }
    }

    /// Runs `query` against every peer and merges the answers.
    pub async fn run(&self, query: &str, peers: &[String]) -> AggregateResult {
        let started = Instant::now();
        let result = aggregate(self.dispatch(query, peers).await);
        info!(
            target: "lake_peer::dispatch",
            peers = peers.len(),
            success = result.success,
            total_rows = result.total_rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Multi-peer query finished"
        );
        result
    }

    /// One outcome per address, in the order given.
    pub async fn dispatch(&self, query: &str, peers: &[String]) -> Vec<PeerOutcome> {
        let query = normalize_query(query);
        let mut outcomes = Vec::with_capacity(peers.len());
        for address in peers {
            let outcome = self.dispatch_one(query, address).await;
            match outcome.error() {
                None => debug!(
                    target: "lake_peer::dispatch",
                    peer = %address,
                    rows = outcome.row_count(),
                    "Peer answered"
                ),
                Some(error) => warn!(
                    target: "lake_peer::dispatch",
                    peer = %address,
                    error,
                    "Peer failed"
                ),
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn dispatch_one(&self, query: &str, address: &str) -> PeerOutcome {
        if classify(address, &self.node.host, self.node.port) == AddressKind::Local {
            debug!(target: "lake_peer::dispatch", peer = address, "Self-query, executing locally");
            return self.execute_locally(query);
        }

        debug!(target: "lake_peer::dispatch", peer = address, "Probing remote peer");
        if let Err(e) = self.probe.probe(address).await {
            return PeerOutcome::failure(address, e.to_string());
        }

        self.client.query(address, query).await
    }

    /// Runs `query` on the local engine without touching the network. A
    /// self-referencing peer entry must not call back into this node's own
    /// listener.
    pub fn execute_locally(&self, query: &str) -> PeerOutcome {
        PeerOutcome::from_execution(&self.node.peer_id, self.executor.execute(query))
    }
}
