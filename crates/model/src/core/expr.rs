use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// A raw SQL expression kept as text fragments interleaved with bound
/// parameters. A well-formed expression has exactly one more fragment
/// than it has parameters:
/// `fragments[0] params[0] fragments[1] ... params[n-1] fragments[n]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlExpr {
    pub fragments: Vec<String>,
    pub params: Vec<Value>,
}

impl SqlExpr {
    /// Starts an expression from a plain SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            fragments: vec![sql.into()],
            params: Vec::new(),
        }
    }

    /// Appends a bound parameter followed by the SQL text continuing
    /// after it, preserving the interleaving shape.
    pub fn bind(mut self, param: impl Into<Value>, rest: impl Into<String>) -> Self {
        self.params.push(param.into());
        self.fragments.push(rest.into());
        self
    }

    pub fn is_well_formed(&self) -> bool {
        self.fragments.len() == self.params.len() + 1
    }
}

/// A position that accepts either a plain literal or a raw expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Value(Value),
    Sql(SqlExpr),
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<SqlExpr> for Expr {
    fn from(expr: SqlExpr) -> Self {
        Expr::Sql(expr)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Value(Value::String(value.to_string()))
    }
}
