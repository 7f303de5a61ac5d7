use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::ident::Ident;
use crate::core::value::Value;
use crate::ops::MigrationOp;
use crate::schema::column::ColumnDef;
use crate::schema::constraint::TableConstraint;

/// Creates a table with its full column and constraint roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableOp {
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    /// Extra engine-specific table options, rendered sorted by key.
    pub options: BTreeMap<String, Value>,
}

impl CreateTableOp {
    pub fn new(table_name: impl Into<Ident>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
            columns: Vec::new(),
            constraints: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl From<CreateTableOp> for MigrationOp {
    fn from(op: CreateTableOp) -> Self {
        MigrationOp::CreateTable(op)
    }
}

/// Drops a table by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableOp {
    pub table_name: Ident,
    pub schema: Option<Ident>,
}

impl DropTableOp {
    pub fn new(table_name: impl Into<Ident>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<DropTableOp> for MigrationOp {
    fn from(op: DropTableOp) -> Self {
        MigrationOp::DropTable(op)
    }
}
