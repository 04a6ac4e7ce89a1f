use serde::{Deserialize, Serialize};

use crate::shared::wire::Row;

/// Result of running one statement locally. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecutionResult {
    pub success: bool,
    pub data: Vec<Row>,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(columns: Vec<String>, data: Vec<Row>) -> Self {
        Self {
            success: true,
            row_count: data.len(),
            data,
            columns,
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub column_type: String,
}

/// The analytical engine a node answers self-queries with.
///
/// Implementations must not panic on bad input: every failure is reported
/// through `ExecutionResult { success: false, .. }`.
pub trait LocalQueryExecutor: Send + Sync {
    fn execute(&self, query: &str) -> ExecutionResult;

    /// Names of the tables currently loaded, sorted.
    fn tables(&self) -> Vec<String>;

    fn table_schema(&self, table: &str) -> Option<Vec<ColumnInfo>>;
}
