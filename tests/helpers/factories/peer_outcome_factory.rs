use serde_json::{Value, json};

use crate::peer::PeerOutcome;
use crate::shared::wire::Row;

pub struct PeerOutcomeFactory {
    peer_id: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    error: Option<String>,
}

impl PeerOutcomeFactory {
    pub fn new() -> Self {
        Self {
            peer_id: "peer_1".to_string(),
            columns: vec!["id".to_string()],
            rows: vec![vec![json!(1)]],
            error: None,
        }
    }

    pub fn with_peer_id(mut self, peer_id: &str) -> Self {
        self.peer_id = peer_id.to_string();
        self
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn failed(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn create(self) -> PeerOutcome {
        match self.error {
            Some(error) => PeerOutcome::failure(self.peer_id, error),
            None => PeerOutcome::success(self.peer_id, self.columns, self.rows),
        }
    }
}
