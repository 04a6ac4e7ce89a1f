use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::engine::errors::EngineError;
use crate::engine::executor::ColumnInfo;
use crate::shared::wire::Row;

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Builds a table, rejecting duplicate column names and rows whose arity
    /// differs from the header.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Row>,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        if columns.is_empty() {
            return Err(EngineError::InvalidTable {
                table: name,
                reason: "no columns".to_string(),
            });
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.eq_ignore_ascii_case(col)) {
                return Err(EngineError::InvalidTable {
                    table: name,
                    reason: format!("duplicate column '{col}'"),
                });
            }
        }
        if let Some(pos) = rows.iter().position(|r| r.len() != columns.len()) {
            return Err(EngineError::InvalidTable {
                reason: format!(
                    "row {pos} has {} values, expected {}",
                    rows[pos].len(),
                    columns.len()
                ),
                table: name,
            });
        }
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
    }

    /// Column types, inferred from the first non-null value of each column.
    pub fn schema(&self) -> Vec<ColumnInfo> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let first = self.rows.iter().map(|r| &r[i]).find(|v| !v.is_null());
                ColumnInfo {
                    column_name: name.clone(),
                    column_type: type_name(first).to_string(),
                }
            })
            .collect()
    }
}

fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None | Some(Value::Null) => "NULL",
        Some(Value::Bool(_)) => "BOOLEAN",
        Some(Value::Number(n)) if n.is_f64() => "DOUBLE",
        Some(Value::Number(_)) => "BIGINT",
        Some(Value::String(_)) => "VARCHAR",
        Some(Value::Array(_)) | Some(Value::Object(_)) => "JSON",
    }
}

/// Tables keyed by lower-cased name; lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct TableCatalog {
    tables: RwLock<BTreeMap<String, Arc<Table>>>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, table: Table) -> Result<(), EngineError> {
        let key = table.name.to_ascii_lowercase();
        let mut tables = self.tables.write();
        if tables.contains_key(&key) {
            return Err(EngineError::TableExists(table.name));
        }
        info!(
            target: "lake_peer::engine",
            table = %table.name,
            rows = table.rows.len(),
            "Registered table"
        );
        tables.insert(key, Arc::new(table));
        Ok(())
    }

    /// Inserts or overwrites a table.
    pub fn replace(&self, table: Table) {
        let key = table.name.to_ascii_lowercase();
        self.tables.write().insert(key, Arc::new(table));
    }

    pub fn drop_table(&self, name: &str) -> bool {
        self.tables
            .write()
            .remove(&name.to_ascii_lowercase())
            .is_some()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.read().get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.tables.read().values().map(|t| t.name.clone()).collect()
    }
}
