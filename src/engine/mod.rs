//! Local query execution.
//!
//! The coordinator only depends on [`LocalQueryExecutor`]. [`MemoryEngine`]
//! is the in-process implementation the node ships with: an in-memory table
//! catalog queried through a small SQL dialect.

pub mod catalog;
pub mod errors;
pub mod executor;
pub mod memory;
pub mod sql;

pub use catalog::{Table, TableCatalog};
pub use errors::EngineError;
pub use executor::{ColumnInfo, ExecutionResult, LocalQueryExecutor};
pub use memory::MemoryEngine;
