use serde::{Deserialize, Serialize};

use crate::core::expr::SqlExpr;
use crate::core::ident::{Ident, NameRef};
use crate::ops::MigrationOp;
use crate::schema::constraint::UniqueDef;

/// Adds a unique constraint to an existing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUniqueConstraintOp {
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub constraint: UniqueDef,
}

impl CreateUniqueConstraintOp {
    pub fn new(table_name: impl Into<Ident>, constraint: UniqueDef) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
            constraint,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<CreateUniqueConstraintOp> for MigrationOp {
    fn from(op: CreateUniqueConstraintOp) -> Self {
        MigrationOp::CreateUniqueConstraint(op)
    }
}

/// Adds a foreign key between two existing tables. Optional relational
/// behaviors render in a fixed declared order that downstream tooling
/// relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateForeignKeyOp {
    pub constraint_name: Option<NameRef>,
    pub source_table: Ident,
    pub referent_table: Ident,
    pub local_cols: Vec<Ident>,
    pub remote_cols: Vec<Ident>,
    pub source_schema: Option<Ident>,
    pub referent_schema: Option<Ident>,
    pub onupdate: Option<String>,
    pub ondelete: Option<String>,
    pub initially: Option<String>,
    pub deferrable: Option<bool>,
    pub use_alter: Option<bool>,
}

impl CreateForeignKeyOp {
    pub fn new<L, R>(
        source_table: impl Into<Ident>,
        referent_table: impl Into<Ident>,
        local_cols: L,
        remote_cols: R,
    ) -> Self
    where
        L: IntoIterator,
        L::Item: Into<Ident>,
        R: IntoIterator,
        R::Item: Into<Ident>,
    {
        Self {
            constraint_name: None,
            source_table: source_table.into(),
            referent_table: referent_table.into(),
            local_cols: local_cols.into_iter().map(Into::into).collect(),
            remote_cols: remote_cols.into_iter().map(Into::into).collect(),
            source_schema: None,
            referent_schema: None,
            onupdate: None,
            ondelete: None,
            initially: None,
            deferrable: None,
            use_alter: None,
        }
    }

    pub fn name(mut self, name: NameRef) -> Self {
        self.constraint_name = Some(name);
        self
    }

    pub fn source_schema(mut self, schema: impl Into<Ident>) -> Self {
        self.source_schema = Some(schema.into());
        self
    }

    pub fn referent_schema(mut self, schema: impl Into<Ident>) -> Self {
        self.referent_schema = Some(schema.into());
        self
    }

    pub fn onupdate(mut self, action: impl Into<String>) -> Self {
        self.onupdate = Some(action.into());
        self
    }

    pub fn ondelete(mut self, action: impl Into<String>) -> Self {
        self.ondelete = Some(action.into());
        self
    }

    pub fn initially(mut self, initially: impl Into<String>) -> Self {
        self.initially = Some(initially.into());
        self
    }

    pub fn deferrable(mut self, deferrable: bool) -> Self {
        self.deferrable = Some(deferrable);
        self
    }

    pub fn use_alter(mut self, use_alter: bool) -> Self {
        self.use_alter = Some(use_alter);
        self
    }
}

impl From<CreateForeignKeyOp> for MigrationOp {
    fn from(op: CreateForeignKeyOp) -> Self {
        MigrationOp::CreateForeignKey(op)
    }
}

/// Adds a primary key to an existing table. Script rendering for this
/// operation is intentionally unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePrimaryKeyOp {
    pub constraint_name: Option<NameRef>,
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub columns: Vec<Ident>,
}

impl CreatePrimaryKeyOp {
    pub fn new<C>(table_name: impl Into<Ident>, columns: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Ident>,
    {
        Self {
            constraint_name: None,
            table_name: table_name.into(),
            schema: None,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreatePrimaryKeyOp> for MigrationOp {
    fn from(op: CreatePrimaryKeyOp) -> Self {
        MigrationOp::CreatePrimaryKey(op)
    }
}

/// Adds a check constraint to an existing table. Script rendering for
/// this operation is intentionally unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckConstraintOp {
    pub constraint_name: Option<NameRef>,
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub condition: SqlExpr,
}

impl CreateCheckConstraintOp {
    pub fn new(table_name: impl Into<Ident>, condition: SqlExpr) -> Self {
        Self {
            constraint_name: None,
            table_name: table_name.into(),
            schema: None,
            condition,
        }
    }
}

impl From<CreateCheckConstraintOp> for MigrationOp {
    fn from(op: CreateCheckConstraintOp) -> Self {
        MigrationOp::CreateCheckConstraint(op)
    }
}

/// Drops a named constraint of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropConstraintOp {
    pub constraint_name: NameRef,
    pub table_name: Ident,
    pub schema: Option<Ident>,
    /// Type tag some engines need to pick the right drop statement
    /// (`unique`, `foreignkey`, ...). Rendered even when unknown.
    pub constraint_type: Option<String>,
}

impl DropConstraintOp {
    pub fn new(constraint_name: impl Into<NameRef>, table_name: impl Into<Ident>) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            table_name: table_name.into(),
            schema: None,
            constraint_type: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn constraint_type(mut self, constraint_type: impl Into<String>) -> Self {
        self.constraint_type = Some(constraint_type.into());
        self
    }
}

impl From<DropConstraintOp> for MigrationOp {
    fn from(op: DropConstraintOp) -> Self {
        MigrationOp::DropConstraint(op)
    }
}
