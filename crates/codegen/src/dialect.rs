//! Defines the `Dialect` trait for engine-specific literal syntax.

use model::core::value::Value;

/// Engine metadata consulted when raw expressions are compiled into
/// inline SQL text.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;

    /// Renders a bound parameter as an inline SQL literal, or `None`
    /// when the dialect has no literal form for the value.
    fn literal(&self, value: &Value) -> Option<String>;
}

fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn numeric(value: &Value) -> Option<String> {
    match value {
        Value::Int(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> String {
        "PostgreSQL".to_string()
    }

    fn literal(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => Some("NULL".to_string()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::String(v) => Some(quoted(v)),
            other => numeric(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> String {
        "MySQL".to_string()
    }

    fn literal(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => Some("NULL".to_string()),
            Value::Boolean(true) => Some("1".to_string()),
            Value::Boolean(false) => Some("0".to_string()),
            // Backslashes are escape characters in MySQL string literals.
            Value::String(v) => Some(quoted(&v.replace('\\', "\\\\"))),
            other => numeric(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> String {
        "SQLite".to_string()
    }

    fn literal(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => Some("NULL".to_string()),
            Value::Boolean(true) => Some("1".to_string()),
            Value::Boolean(false) => Some("0".to_string()),
            Value::String(v) => Some(quoted(v)),
            other => numeric(other),
        }
    }
}

/// Fallback for engines without dedicated literal rules.
#[derive(Debug, Clone)]
pub struct Generic;

impl Dialect for Generic {
    fn name(&self) -> String {
        "generic".to_string()
    }

    fn literal(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => Some("NULL".to_string()),
            Value::Boolean(true) => Some("TRUE".to_string()),
            Value::Boolean(false) => Some("FALSE".to_string()),
            Value::String(v) => Some(quoted(v)),
            other => numeric(other),
        }
    }
}
