use serde_json::{Value, json};

use crate::shared::wire::{QueryResponse, Row};

pub struct QueryResponseFactory {
    response: QueryResponse,
}

impl QueryResponseFactory {
    pub fn new() -> Self {
        Self {
            response: QueryResponse {
                success: true,
                data: vec![vec![json!(1)]],
                columns: vec!["id".to_string()],
                row_count: 1,
                error: None,
                peer_id: Some("peer_2".to_string()),
            },
        }
    }

    pub fn with_peer_id(mut self, peer_id: Option<&str>) -> Self {
        self.response.peer_id = peer_id.map(str::to_string);
        self
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.response.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Sets the rows and a matching `row_count`.
    pub fn with_rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.response.row_count = rows.len();
        self.response.data = rows;
        self
    }

    pub fn failed(mut self, error: Option<&str>) -> Self {
        self.response.success = false;
        self.response.data = Vec::<Row>::new();
        self.response.columns = Vec::new();
        self.response.row_count = 0;
        self.response.error = error.map(str::to_string);
        self
    }

    pub fn create(self) -> QueryResponse {
        self.response
    }

    pub fn to_json(self) -> String {
        serde_json::to_string(&self.response).unwrap()
    }
}
