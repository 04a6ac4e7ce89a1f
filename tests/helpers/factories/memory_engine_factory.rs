use serde_json::{Value, json};

use crate::engine::MemoryEngine;

/// Builds a [`MemoryEngine`] preloaded with tables.
pub struct MemoryEngineFactory {
    tables: Vec<(String, Vec<String>, Vec<Vec<Value>>)>,
}

impl MemoryEngineFactory {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn with_table(mut self, name: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        self.tables.push((
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
        ));
        self
    }

    /// `sales(region, product, amount, paid)` with four rows.
    pub fn with_sales(self) -> Self {
        self.with_table(
            "sales",
            &["region", "product", "amount", "paid"],
            vec![
                vec![json!("north"), json!("widget"), json!(120), json!(true)],
                vec![json!("south"), json!("gadget"), json!(75.5), json!(false)],
                vec![json!("north"), json!("gizmo"), json!(40), json!(true)],
                vec![json!("east"), json!("widget"), Value::Null, json!(false)],
            ],
        )
    }

    pub fn create(self) -> MemoryEngine {
        let engine = MemoryEngine::new();
        for (name, columns, rows) in self.tables {
            engine
                .register_table(&name, columns, rows)
                .expect("factory tables should be valid");
        }
        engine
    }
}
