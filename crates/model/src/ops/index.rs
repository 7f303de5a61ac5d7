use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::expr::{Expr, SqlExpr};
use crate::core::ident::{Ident, NameRef};
use crate::ops::MigrationOp;

/// One indexed element: a plain column or a computed expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexElement {
    Column(Ident),
    Expr(SqlExpr),
}

impl From<&str> for IndexElement {
    fn from(name: &str) -> Self {
        IndexElement::Column(Ident::new(name))
    }
}

impl From<Ident> for IndexElement {
    fn from(name: Ident) -> Self {
        IndexElement::Column(name)
    }
}

impl From<SqlExpr> for IndexElement {
    fn from(expr: SqlExpr) -> Self {
        IndexElement::Expr(expr)
    }
}

/// Creates an index over columns and/or expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexOp {
    pub index_name: NameRef,
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub unique: bool,
    pub elements: Vec<IndexElement>,
    /// Engine-specific index options, rendered sorted by key. Values
    /// may be raw expressions, not only literals.
    pub options: BTreeMap<String, Expr>,
}

impl CreateIndexOp {
    pub fn new(index_name: impl Into<NameRef>, table_name: impl Into<Ident>) -> Self {
        Self {
            index_name: index_name.into(),
            table_name: table_name.into(),
            schema: None,
            unique: false,
            elements: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn element(mut self, element: impl Into<IndexElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl From<CreateIndexOp> for MigrationOp {
    fn from(op: CreateIndexOp) -> Self {
        MigrationOp::CreateIndex(op)
    }
}

/// Drops an index by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropIndexOp {
    pub index_name: NameRef,
    pub table_name: Ident,
    pub schema: Option<Ident>,
}

impl DropIndexOp {
    pub fn new(index_name: impl Into<NameRef>, table_name: impl Into<Ident>) -> Self {
        Self {
            index_name: index_name.into(),
            table_name: table_name.into(),
            schema: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<DropIndexOp> for MigrationOp {
    fn from(op: DropIndexOp) -> Self {
        MigrationOp::DropIndex(op)
    }
}
