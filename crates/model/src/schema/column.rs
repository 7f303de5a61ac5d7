use serde::{Deserialize, Serialize};

use crate::core::expr::SqlExpr;
use crate::core::ident::Ident;
use crate::schema::types::TypeRef;

/// A column-level server default: either verbatim DDL text or a
/// computed expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerDefault {
    Text(String),
    Expr(SqlExpr),
}

/// Change marker for a column default in an alter operation. The
/// distinct `Remove` state keeps "drop the default" apart from "leave
/// it alone".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum DefaultChange {
    #[default]
    Unchanged,
    Remove,
    Set(ServerDefault),
}

/// A full column definition as carried by create-table and add-column
/// operations. `autoincrement` is only meaningful when explicitly
/// disabled; an unset or enabled flag renders to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: TypeRef,
    pub nullable: Option<bool>,
    pub server_default: Option<ServerDefault>,
    pub autoincrement: Option<bool>,
}

impl ColumnDef {
    pub fn new(name: impl Into<Ident>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: None,
            server_default: None,
            autoincrement: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn server_default(mut self, default: ServerDefault) -> Self {
        self.server_default = Some(default);
        self
    }

    pub fn default_text(self, text: impl Into<String>) -> Self {
        self.server_default(ServerDefault::Text(text.into()))
    }

    pub fn autoincrement(mut self, autoincrement: bool) -> Self {
        self.autoincrement = Some(autoincrement);
        self
    }
}
