use crate::engine::ExecutionResult;
use crate::shared::wire::{QueryResponse, Row};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Result of one dispatch attempt against one peer.
///
/// Success and failure are separate variants, so "succeeded with an error"
/// cannot be represented and the row count always equals `rows.len()`.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerOutcome {
    Success {
        peer_id: String,
        columns: Vec<String>,
        rows: Vec<Row>,
    },
    Failure {
        peer_id: String,
        error: String,
    },
}

impl PeerOutcome {
    pub fn success(peer_id: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        PeerOutcome::Success {
            peer_id: peer_id.into(),
            columns,
            rows,
        }
    }

    pub fn failure(peer_id: impl Into<String>, error: impl Into<String>) -> Self {
        PeerOutcome::Failure {
            peer_id: peer_id.into(),
            error: error.into(),
        }
    }

    /// Wraps a local engine result under this node's identifier.
    pub fn from_execution(peer_id: &str, result: ExecutionResult) -> Self {
        if result.success {
            Self::success(peer_id, result.columns, result.data)
        } else {
            Self::failure(
                peer_id,
                result.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )
        }
    }

    /// Normalizes a remote peer's `/query` body. The remote `peer_id` wins
    /// when present, otherwise the address the query was sent to is used.
    pub fn from_response(peer_address: &str, response: QueryResponse) -> Self {
        let peer_id = response
            .peer_id
            .unwrap_or_else(|| peer_address.to_string());
        if response.success {
            Self::success(peer_id, response.columns, response.data)
        } else {
            Self::failure(
                peer_id,
                response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )
        }
    }

    pub fn peer_id(&self) -> &str {
        match self {
            PeerOutcome::Success { peer_id, .. } | PeerOutcome::Failure { peer_id, .. } => peer_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PeerOutcome::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PeerOutcome::Failure { error, .. } => Some(error),
            PeerOutcome::Success { .. } => None,
        }
    }

    pub fn columns(&self) -> &[String] {
        match self {
            PeerOutcome::Success { columns, .. } => columns,
            PeerOutcome::Failure { .. } => &[],
        }
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            PeerOutcome::Success { rows, .. } => rows,
            PeerOutcome::Failure { .. } => &[],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }
}

impl From<PeerOutcome> for QueryResponse {
    fn from(outcome: PeerOutcome) -> Self {
        match outcome {
            PeerOutcome::Success {
                peer_id,
                columns,
                rows,
            } => QueryResponse {
                success: true,
                row_count: rows.len(),
                data: rows,
                columns,
                error: None,
                peer_id: Some(peer_id),
            },
            PeerOutcome::Failure { peer_id, error } => QueryResponse {
                success: false,
                data: Vec::new(),
                columns: Vec::new(),
                row_count: 0,
                error: Some(error),
                peer_id: Some(peer_id),
            },
        }
    }
}
