use thiserror::Error;

/// Failures inside the local engine. These never cross the executor
/// boundary; [`crate::engine::ExecutionResult::failed`] carries their text.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Parser error: {0}")]
    Parse(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    #[error("Unsupported query: {0}")]
    Unsupported(String),
}
