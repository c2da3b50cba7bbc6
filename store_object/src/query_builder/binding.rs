//! Binding clause values to SQLite statements
//!
//! Values are bound by their JSON kind so comparisons against `->>`
//! extractions see the same SQL type the engine extracted: strings as TEXT,
//! integers as INTEGER, other numbers as REAL, booleans as 0/1. Arrays and
//! objects bind as their JSON text.

use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

pub fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                // u64 beyond i64::MAX
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(value.to_string()),
    }
}

pub fn bind_values<'q>(query: SqliteQuery<'q>, values: &[Value]) -> SqliteQuery<'q> {
    values.iter().fold(query, bind_value)
}
