//! Operations describing one schema change each, plus the containers
//! that group them into a migration script.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub mod column;
pub mod constraint;
pub mod execute;
pub mod index;
pub mod table;

pub use column::{AddColumnOp, AlterColumnOp, DropColumnOp};
pub use constraint::{
    CreateCheckConstraintOp, CreateForeignKeyOp, CreatePrimaryKeyOp, CreateUniqueConstraintOp,
    DropConstraintOp,
};
pub use execute::ExecuteSqlOp;
pub use index::{CreateIndexOp, DropIndexOp, IndexElement};
pub use table::{CreateTableOp, DropTableOp};

use crate::core::ident::Ident;

/// One schema-change instruction.
#[derive(Debug, Clone)]
pub enum MigrationOp {
    CreateTable(CreateTableOp),
    DropTable(DropTableOp),
    AddColumn(AddColumnOp),
    DropColumn(DropColumnOp),
    AlterColumn(AlterColumnOp),
    CreateIndex(CreateIndexOp),
    DropIndex(DropIndexOp),
    CreateUniqueConstraint(CreateUniqueConstraintOp),
    CreateForeignKey(CreateForeignKeyOp),
    CreatePrimaryKey(CreatePrimaryKeyOp),
    CreateCheckConstraint(CreateCheckConstraintOp),
    DropConstraint(DropConstraintOp),
    ExecuteSql(ExecuteSqlOp),
    ModifyTable(ModifyTableOps),
    /// An operation kind defined outside this crate, rendered through
    /// the registry the caller configures.
    Custom(Arc<dyn CustomOperation>),
}

impl MigrationOp {
    /// Stable tag identifying the operation kind, used to dispatch
    /// custom operations and for diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            MigrationOp::CreateTable(_) => "create_table",
            MigrationOp::DropTable(_) => "drop_table",
            MigrationOp::AddColumn(_) => "add_column",
            MigrationOp::DropColumn(_) => "drop_column",
            MigrationOp::AlterColumn(_) => "alter_column",
            MigrationOp::CreateIndex(_) => "create_index",
            MigrationOp::DropIndex(_) => "drop_index",
            MigrationOp::CreateUniqueConstraint(_) => "create_unique_constraint",
            MigrationOp::CreateForeignKey(_) => "create_foreign_key",
            MigrationOp::CreatePrimaryKey(_) => "create_primary_key",
            MigrationOp::CreateCheckConstraint(_) => "create_check_constraint",
            MigrationOp::DropConstraint(_) => "drop_constraint",
            MigrationOp::ExecuteSql(_) => "execute",
            MigrationOp::ModifyTable(_) => "modify_table",
            MigrationOp::Custom(op) => op.kind(),
        }
    }
}

/// Extension point for operation kinds unknown to this crate. Custom
/// operations travel through the tree as trait objects and are
/// rendered by a registered renderer matching `kind()`.
pub trait CustomOperation: fmt::Debug + Send + Sync {
    /// Dispatch tag matched against registered renderers.
    fn kind(&self) -> &str;

    /// Access to the concrete operation for its renderer.
    fn as_any(&self) -> &dyn Any;
}

impl From<Arc<dyn CustomOperation>> for MigrationOp {
    fn from(op: Arc<dyn CustomOperation>) -> Self {
        MigrationOp::Custom(op)
    }
}

/// Ordered child operations of one table, optionally scoped to a
/// schema. The only recursive operation container.
#[derive(Debug, Clone)]
pub struct ModifyTableOps {
    pub table_name: Ident,
    pub schema: Option<Ident>,
    pub ops: Vec<MigrationOp>,
}

impl ModifyTableOps {
    pub fn new(table_name: impl Into<Ident>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
            ops: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<Ident>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn op(mut self, op: impl Into<MigrationOp>) -> Self {
        self.ops.push(op.into());
        self
    }
}

impl From<ModifyTableOps> for MigrationOp {
    fn from(op: ModifyTableOps) -> Self {
        MigrationOp::ModifyTable(op)
    }
}

/// Flat root container for one migration direction.
#[derive(Debug, Clone, Default)]
pub struct OpContainer {
    pub ops: Vec<MigrationOp>,
}

impl OpContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, op: impl Into<MigrationOp>) -> Self {
        self.ops.push(op.into());
        self
    }

    pub fn push(&mut self, op: impl Into<MigrationOp>) {
        self.ops.push(op.into());
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// The upgrade and downgrade operation trees of one migration script.
#[derive(Debug, Clone, Default)]
pub struct MigrationScript {
    pub upgrade_ops: OpContainer,
    pub downgrade_ops: OpContainer,
}

impl MigrationScript {
    pub fn new(upgrade_ops: OpContainer, downgrade_ops: OpContainer) -> Self {
        Self {
            upgrade_ops,
            downgrade_ops,
        }
    }
}
