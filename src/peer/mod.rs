//! Multi-peer query coordination.
//!
//! A request names a query and an ordered list of peer addresses. For each
//! address the [`Dispatcher`] either runs the query on the local engine
//! (the address is this node) or probes the remote peer's `/health` and then
//! posts the query to its `/query`. Every attempt yields a [`PeerOutcome`];
//! [`aggregate`] folds the ordered outcomes into one [`AggregateResult`].
//!
//! ```text
//! MultiPeerRequest ──▶ Dispatcher ──┬─ self ──▶ LocalQueryExecutor
//!                                   └─ remote ─▶ LivenessProbe ─▶ PeerQueryClient
//!                        │
//!                        ▼
//!               [PeerOutcome; n] ──▶ aggregate ──▶ AggregateResult
//! ```

pub mod address;
pub mod aggregator;
pub mod client;
pub mod dispatcher;
pub mod node;
pub mod outcome;
pub mod probe;
pub mod transport;

pub use address::{AddressKind, classify};
pub use aggregator::{AggregateResult, aggregate};
pub use client::{DEFAULT_QUERY_TIMEOUT, PeerQueryClient};
pub use dispatcher::{Dispatcher, PeerTimeouts, normalize_query};
pub use node::LocalNode;
pub use outcome::PeerOutcome;
pub use probe::{DEFAULT_PROBE_TIMEOUT, LivenessProbe, ProbeError};
pub use transport::{HttpReply, HyperTransport, PeerTransport, TransportError};
