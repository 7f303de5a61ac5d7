use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::expr::SqlExpr;
use crate::core::ident::{Ident, NameRef};
use crate::schema::catalog::TableCatalog;

/// A table-level constraint attached to a create-table operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableConstraint {
    PrimaryKey(PrimaryKeyDef),
    ForeignKey(ForeignKeyDef),
    Unique(UniqueDef),
    Check(CheckDef),
}

/// Primary key over the given column keys. A definition without
/// columns is treated as absent and renders to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKeyDef {
    pub name: Option<NameRef>,
    /// Lookup keys of the member columns, not their rendered names.
    pub columns: Vec<String>,
}

impl PrimaryKeyDef {
    pub fn new<C>(columns: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(mut self, name: NameRef) -> Self {
        self.name = Some(name);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueDef {
    pub name: Option<NameRef>,
    pub columns: Vec<Ident>,
    pub deferrable: Option<String>,
    pub initially: Option<String>,
}

impl UniqueDef {
    pub fn new<C>(columns: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Ident>,
    {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            deferrable: None,
            initially: None,
        }
    }

    pub fn name(mut self, name: NameRef) -> Self {
        self.name = Some(name);
        self
    }

    pub fn deferrable(mut self, deferrable: impl Into<String>) -> Self {
        self.deferrable = Some(deferrable.into());
        self
    }

    pub fn initially(mut self, initially: impl Into<String>) -> Self {
        self.initially = Some(initially.into());
        self
    }
}

/// A dotted reference to a remote column: `table.column` or
/// `schema.table.column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec(String);

impl ColumnSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }
}

impl From<&str> for ColumnSpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnSpec {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDef {
    pub name: Option<NameRef>,
    /// Local column names, in declaration order.
    pub columns: Vec<Ident>,
    /// Remote targets, one per local column.
    pub refcolumns: Vec<ColumnSpec>,
    pub onupdate: Option<String>,
    pub ondelete: Option<String>,
    pub initially: Option<String>,
    pub deferrable: Option<bool>,
    pub use_alter: Option<bool>,
    /// Tables known to the surrounding schema collection, when the
    /// constraint was captured from one. Enables canonical-name
    /// substitution for referenced columns.
    #[serde(skip)]
    pub catalog: Option<Arc<TableCatalog>>,
}

impl ForeignKeyDef {
    pub fn new<C, R>(columns: C, refcolumns: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Ident>,
        R: IntoIterator,
        R::Item: Into<ColumnSpec>,
    {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            refcolumns: refcolumns.into_iter().map(Into::into).collect(),
            onupdate: None,
            ondelete: None,
            initially: None,
            deferrable: None,
            use_alter: None,
            catalog: None,
        }
    }

    pub fn name(mut self, name: NameRef) -> Self {
        self.name = Some(name);
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

    pub fn catalog(mut self, catalog: Arc<TableCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Check constraint over a raw SQL condition. `from_column_type` marks
/// checks a column type already owns; those are skipped when the table
/// is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDef {
    pub name: Option<NameRef>,
    pub sqltext: SqlExpr,
    pub from_column_type: bool,
}

impl CheckDef {
    pub fn new(sqltext: SqlExpr) -> Self {
        Self {
            name: None,
            sqltext,
            from_column_type: false,
        }
    }

    pub fn name(mut self, name: NameRef) -> Self {
        self.name = Some(name);
        self
    }

    pub fn from_column_type(mut self) -> Self {
        self.from_column_type = true;
        self
    }
}
