//! JSON bodies exchanged between peers and with coordinator clients.
//!
//! Field names follow the peer contract: `row_count`, `peer_id`,
//! `aggregated_data` and `total_rows` are snake_case on the wire, and absent
//! errors serialize as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::ColumnInfo;

pub type Row = Vec<Value>;

/// Body of `POST /query`. `sql` is accepted as an alias for `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(alias = "sql")]
    pub query: String,
}

/// Body of `POST /query/multi-peer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPeerRequest {
    pub query: String,
    pub peers: Vec<String>,
}

/// Answer of a single peer, both as served by `POST /query` and as nested
/// in a multi-peer response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub peer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPeerResponse {
    pub success: bool,
    pub results: Vec<QueryResponse>,
    pub aggregated_data: Vec<Row>,
    pub columns: Vec<String>,
    pub total_rows: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub peer_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub peer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub peer_id: String,
    pub host: String,
    pub port: u16,
    pub tables: Vec<String>,
    pub table_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub table_name: String,
    pub schema: Vec<ColumnInfo>,
}

/// Error body used for 4xx replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
