use serde::{Deserialize, Serialize};

use crate::core::expr::Expr;
use crate::ops::MigrationOp;

/// Executes a raw SQL statement as its own migration step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteSqlOp {
    pub sqltext: Expr,
}

impl ExecuteSqlOp {
    pub fn new(sqltext: impl Into<Expr>) -> Self {
        Self {
            sqltext: sqltext.into(),
        }
    }
}

impl From<ExecuteSqlOp> for MigrationOp {
    fn from(op: ExecuteSqlOp) -> Self {
        MigrationOp::ExecuteSql(op)
    }
}
