use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

use crate::engine::catalog::{Table, TableCatalog};
use crate::engine::errors::EngineError;
use crate::engine::executor::{ColumnInfo, ExecutionResult, LocalQueryExecutor};
use crate::engine::sql::{self, CompareOp, Condition, Select, SelectItem, Statement};
use crate::shared::wire::Row;

const COUNT_STAR_COLUMN: &str = "count_star()";

/// In-memory executor over a [`TableCatalog`].
#[derive(Debug, Default)]
pub struct MemoryEngine {
    catalog: TableCatalog,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_table(
        &self,
        name: &str,
        columns: Vec<String>,
        rows: Vec<Row>,
    ) -> Result<(), EngineError> {
        self.catalog.register(Table::new(name, columns, rows)?)
    }

    pub fn replace_table(
        &self,
        name: &str,
        columns: Vec<String>,
        rows: Vec<Row>,
    ) -> Result<(), EngineError> {
        self.catalog.replace(Table::new(name, columns, rows)?);
        Ok(())
    }

    fn run(&self, query: &str) -> Result<(Vec<String>, Vec<Row>), EngineError> {
        match sql::parse(query)? {
            Statement::ShowTables => Ok((
                vec!["name".to_string()],
                self.catalog
                    .names()
                    .into_iter()
                    .map(|n| vec![Value::String(n)])
                    .collect(),
            )),
            Statement::Describe(table) => {
                let schema = self
                    .table_schema(&table)
                    .ok_or(EngineError::TableNotFound(table))?;
                Ok((
                    vec!["column_name".to_string(), "column_type".to_string()],
                    schema
                        .into_iter()
                        .map(|c| vec![Value::String(c.column_name), Value::String(c.column_type)])
                        .collect(),
                ))
            }
            Statement::Select(select) => self.select(&select),
        }
    }

    fn select(&self, select: &Select) -> Result<(Vec<String>, Vec<Row>), EngineError> {
        let (columns, mut rows) = match &select.from {
            None => select_constants(&select.items)?,
            Some(name) => {
                let table = self
                    .catalog
                    .get(name)
                    .ok_or_else(|| EngineError::TableNotFound(name.clone()))?;
                select_from(&table, select)?
            }
        };
        if let Some(limit) = select.limit {
            rows.truncate(limit);
        }
        Ok((columns, rows))
    }
}

impl LocalQueryExecutor for MemoryEngine {
    fn execute(&self, query: &str) -> ExecutionResult {
        match self.run(query) {
            Ok((columns, rows)) => {
                debug!(target: "lake_peer::engine", rows = rows.len(), "Query executed");
                ExecutionResult::ok(columns, rows)
            }
            Err(e) => {
                debug!(target: "lake_peer::engine", error = %e, "Query failed");
                ExecutionResult::failed(e)
            }
        }
    }

    fn tables(&self) -> Vec<String> {
        self.catalog.names()
    }

    fn table_schema(&self, table: &str) -> Option<Vec<ColumnInfo>> {
        self.catalog.get(table).map(|t| t.schema())
    }
}

fn select_constants(items: &[SelectItem]) -> Result<(Vec<String>, Vec<Row>), EngineError> {
    let mut columns = Vec::with_capacity(items.len());
    let mut row = Vec::with_capacity(items.len());
    for item in items {
        match item {
            SelectItem::Literal { value, alias } => {
                columns.push(alias.clone().unwrap_or_else(|| literal_name(value)));
                row.push(value.clone());
            }
            SelectItem::CountAll { alias } => {
                columns.push(alias.clone().unwrap_or_else(|| COUNT_STAR_COLUMN.to_string()));
                row.push(Value::from(1));
            }
            SelectItem::Column { name, .. } => {
                return Err(EngineError::ColumnNotFound(name.clone()));
            }
            SelectItem::Wildcard => {
                return Err(EngineError::Unsupported(
                    "SELECT * with no tables specified".to_string(),
                ));
            }
        }
    }
    Ok((columns, vec![row]))
}

/// Projection of a matching row. Column items resolve to an index up front.
enum Projection {
    Index(usize),
    Constant(Value),
}

fn select_from(table: &Table, select: &Select) -> Result<(Vec<String>, Vec<Row>), EngineError> {
    let filter = select
        .filter
        .iter()
        .map(|c| {
            table
                .column_index(&c.column)
                .map(|idx| (idx, c))
                .ok_or_else(|| EngineError::ColumnNotFound(c.column.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let matching: Vec<&Row> = table
        .rows
        .iter()
        .filter(|row| filter.iter().all(|(idx, cond)| matches(&row[*idx], cond)))
        .collect();

    let aggregate = select
        .items
        .iter()
        .any(|i| matches!(i, SelectItem::CountAll { .. }));
    if aggregate {
        return count_rows(&select.items, matching.len());
    }

    let mut columns = Vec::new();
    let mut projection = Vec::new();
    for item in &select.items {
        match item {
            SelectItem::Wildcard => {
                columns.extend(table.columns.iter().cloned());
                projection.extend((0..table.columns.len()).map(Projection::Index));
            }
            SelectItem::Column { name, alias } => {
                let idx = table
                    .column_index(name)
                    .ok_or_else(|| EngineError::ColumnNotFound(name.clone()))?;
                columns.push(alias.clone().unwrap_or_else(|| table.columns[idx].clone()));
                projection.push(Projection::Index(idx));
            }
            SelectItem::Literal { value, alias } => {
                columns.push(alias.clone().unwrap_or_else(|| literal_name(value)));
                projection.push(Projection::Constant(value.clone()));
            }
            SelectItem::CountAll { .. } => unreachable!("aggregate handled above"),
        }
    }

    let rows = matching
        .into_iter()
        .map(|row| {
            projection
                .iter()
                .map(|p| match p {
                    Projection::Index(idx) => row[*idx].clone(),
                    Projection::Constant(v) => v.clone(),
                })
                .collect()
        })
        .collect();
    Ok((columns, rows))
}

fn count_rows(items: &[SelectItem], count: usize) -> Result<(Vec<String>, Vec<Row>), EngineError> {
    let mut columns = Vec::with_capacity(items.len());
    let mut row = Vec::with_capacity(items.len());
    for item in items {
        match item {
            SelectItem::CountAll { alias } => {
                columns.push(alias.clone().unwrap_or_else(|| COUNT_STAR_COLUMN.to_string()));
                row.push(Value::from(count as u64));
            }
            SelectItem::Literal { value, alias } => {
                columns.push(alias.clone().unwrap_or_else(|| literal_name(value)));
                row.push(value.clone());
            }
            SelectItem::Column { name, .. } => {
                return Err(EngineError::Unsupported(format!(
                    "column '{name}' must appear in an aggregate; GROUP BY is not supported"
                )));
            }
            SelectItem::Wildcard => {
                return Err(EngineError::Unsupported(
                    "* cannot be combined with COUNT(*)".to_string(),
                ));
            }
        }
    }
    Ok((columns, vec![row]))
}

fn literal_name(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

fn matches(value: &Value, cond: &Condition) -> bool {
    let Some(ord) = compare(value, &cond.value) else {
        return false;
    };
    match cond.op {
        CompareOp::Eq => ord == Ordering::Equal,
        CompareOp::Neq => ord != Ordering::Equal,
        CompareOp::Lt => ord == Ordering::Less,
        CompareOp::Lte => ord != Ordering::Greater,
        CompareOp::Gt => ord == Ordering::Greater,
        CompareOp::Gte => ord != Ordering::Less,
    }
}

/// SQL-style comparison: NULL and mismatched types compare as unknown.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
