use serde::{Deserialize, Serialize};

use crate::core::ident::Ident;
use crate::ops::MigrationOp;
use crate::schema::column::{ColumnDef, DefaultChange, ServerDefault};
use crate::schema::types::TypeRef;

/// Adds one column to an existing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddColumnOp {
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub column: ColumnDef,
}

impl AddColumnOp {
    pub fn new(table_name: impl Into<Ident>, column: ColumnDef) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
            column,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<AddColumnOp> for MigrationOp {
    fn from(op: AddColumnOp) -> Self {
        MigrationOp::AddColumn(op)
    }
}

/// Drops one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropColumnOp {
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub column_name: Ident,
}

impl DropColumnOp {
    pub fn new(table_name: impl Into<Ident>, column_name: impl Into<Ident>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
            column_name: column_name.into(),
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<DropColumnOp> for MigrationOp {
    fn from(op: DropColumnOp) -> Self {
        MigrationOp::DropColumn(op)
    }
}

/// Changes attributes of one column. The `existing_*` fields anchor the
/// pre-change state for tooling that inspects the generated script; the
/// `modify_*` fields carry the requested changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterColumnOp {
    pub table_name: Ident,
    pub column_name: Ident,
    pub schema: Option<Ident>,
    pub existing_type: TypeRef,
    pub existing_nullable: Option<bool>,
    pub existing_server_default: Option<ServerDefault>,
    pub modify_nullable: Option<bool>,
    pub modify_type: Option<TypeRef>,
    pub modify_server_default: DefaultChange,
}

impl AlterColumnOp {
    pub fn new(
        table_name: impl Into<Ident>,
        column_name: impl Into<Ident>,
        existing_type: TypeRef,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            schema: None,
            existing_type,
            existing_nullable: None,
            existing_server_default: None,
            modify_nullable: None,
            modify_type: None,
            modify_server_default: DefaultChange::Unchanged,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn existing_nullable(mut self, nullable: bool) -> Self {
        self.existing_nullable = Some(nullable);
        self
    }

    pub fn existing_server_default(mut self, default: ServerDefault) -> Self {
        self.existing_server_default = Some(default);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.modify_nullable = Some(nullable);
        self
    }

    pub fn new_type(mut self, data_type: TypeRef) -> Self {
        self.modify_type = Some(data_type);
        self
    }

    pub fn server_default(mut self, change: DefaultChange) -> Self {
        self.modify_server_default = change;
        self
    }
}

impl From<AlterColumnOp> for MigrationOp {
    fn from(op: AlterColumnOp) -> Self {
        MigrationOp::AlterColumn(op)
    }
}
