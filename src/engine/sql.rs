//! The SQL dialect understood by [`crate::engine::MemoryEngine`].
//!
//! ```text
//! SHOW TABLES
//! DESCRIBE <table>
//! SELECT <item> [, <item>]* [FROM <table>]
//!        [WHERE <column> <op> <literal> [AND ...]] [LIMIT <n>]
//! ```
//!
//! Items are `*`, `COUNT(*)`, a column, or a literal, each optionally
//! followed by `AS <alias>`. Keywords are case-insensitive and a single
//! trailing `;` is accepted.

use serde_json::{Number, Value};

use crate::engine::errors::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    ShowTables,
    Describe(String),
    Select(Select),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub items: Vec<SelectItem>,
    pub from: Option<String>,
    pub filter: Vec<Condition>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Wildcard,
    CountAll { alias: Option<String> },
    Column { name: String, alias: Option<String> },
    Literal { value: Value, alias: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

const RESERVED: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "LIMIT", "AS", "SHOW", "TABLES", "DESCRIBE", "TRUE",
    "FALSE", "NULL",
];

fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

fn number_literal(text: &str) -> Option<Value> {
    if text.contains('.') {
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    } else {
        text.parse::<i64>().ok().map(|n| Value::Number(n.into()))
    }
}

peg::parser! {
    grammar mini_sql() for str {
        rule _() = quiet!{ [' ' | '\t' | '\n' | '\r']* }
        rule __() = quiet!{ [' ' | '\t' | '\n' | '\r']+ }

        rule ci(s: &'static str) -> ()
            = kw:$(['a'..='z' | 'A'..='Z']+) !['0'..='9' | '_'] {?
                if kw.eq_ignore_ascii_case(s) { Ok(()) }
                else { Err("expected keyword") }
            }

        rule ident() -> &'input str
            = quiet!{
                id:$( ['a'..='z' | 'A'..='Z' | '_']
                      ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']* ) {?
                    if is_reserved(id) { Err("identifier") } else { Ok(id) }
                }
            }
            / expected!("identifier")

        rule number() -> Value
            = n:$("-"? ['0'..='9']+ ("." ['0'..='9']+)?) {?
                number_literal(n).ok_or("number")
            }

        rule string() -> Value
            = "'" s:$((!"'" [_])*) "'" { Value::String(s.to_string()) }

        rule literal() -> Value
            = number()
            / string()
            / ci("TRUE") { Value::Bool(true) }
            / ci("FALSE") { Value::Bool(false) }
            / ci("NULL") { Value::Null }

        rule alias() -> String
            = __ ci("AS") __ a:ident() { a.to_string() }

        rule item() -> SelectItem
            = "*" { SelectItem::Wildcard }
            / ci("COUNT") _ "(" _ "*" _ ")" alias:alias()? { SelectItem::CountAll { alias } }
            / value:literal() alias:alias()? { SelectItem::Literal { value, alias } }
            / c:ident() alias:alias()? { SelectItem::Column { name: c.to_string(), alias } }

        rule op() -> CompareOp
            = "<=" { CompareOp::Lte }
            / ">=" { CompareOp::Gte }
            / "<>" { CompareOp::Neq }
            / "!=" { CompareOp::Neq }
            / "=" { CompareOp::Eq }
            / "<" { CompareOp::Lt }
            / ">" { CompareOp::Gt }

        rule condition() -> Condition
            = c:ident() _ op:op() _ value:literal() {
                Condition { column: c.to_string(), op, value }
            }

        rule from() -> String
            = __ ci("FROM") __ t:ident() { t.to_string() }

        rule where_clause() -> Vec<Condition>
            = __ ci("WHERE") __ cs:(condition() ++ (__ ci("AND") __)) { cs }

        rule limit() -> usize
            = __ ci("LIMIT") __ n:$(['0'..='9']+) {? n.parse().or(Err("row limit")) }

        rule select() -> Statement
            = ci("SELECT") __ items:(item() ++ (_ "," _))
              from:from()? filter:where_clause()? limit:limit()? {
                Statement::Select(Select {
                    items,
                    from,
                    filter: filter.unwrap_or_default(),
                    limit,
                })
            }

        rule show_tables() -> Statement
            = ci("SHOW") __ ci("TABLES") { Statement::ShowTables }

        rule describe() -> Statement
            = ci("DESCRIBE") __ t:ident() { Statement::Describe(t.to_string()) }

        pub rule statement() -> Statement
            = _ s:(show_tables() / describe() / select()) _ ";"? _ { s }
    }
}

pub fn parse(input: &str) -> Result<Statement, EngineError> {
    mini_sql::statement(input).map_err(|e| EngineError::Parse(e.to_string()))
}
