//! Operation dispatch: turns each node of an operation tree into the
//! script lines that reproduce it.

use model::core::expr::Expr;
use model::core::value::Value;
use model::ops::{ExecuteSqlOp, MigrationOp, ModifyTableOps};
use tracing::trace;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::literal::{py_ident, py_opt_ident, py_str};

pub mod column;
pub mod constraint;
pub mod expr;
pub mod index;
pub mod table;

/// Prefix installed while rendering inside a batch block.
const BATCH_PREFIX: &str = "batch_op.";

/// A trait for any operation that can be rendered into script lines.
pub trait Render {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError>;
}

/// Renders one operation into its ordered output lines.
pub fn render_op(
    ctx: &mut RenderContext<'_>,
    op: &MigrationOp,
) -> Result<Vec<String>, RenderError> {
    trace!("rendering {} operation", op.kind());
    match op {
        MigrationOp::CreateTable(op) => op.render(ctx),
        MigrationOp::DropTable(op) => op.render(ctx),
        MigrationOp::AddColumn(op) => op.render(ctx),
        MigrationOp::DropColumn(op) => op.render(ctx),
        MigrationOp::AlterColumn(op) => op.render(ctx),
        MigrationOp::CreateIndex(op) => op.render(ctx),
        MigrationOp::DropIndex(op) => op.render(ctx),
        MigrationOp::CreateUniqueConstraint(op) => op.render(ctx),
        MigrationOp::CreateForeignKey(op) => op.render(ctx),
        MigrationOp::CreatePrimaryKey(op) => op.render(ctx),
        MigrationOp::CreateCheckConstraint(op) => op.render(ctx),
        MigrationOp::DropConstraint(op) => op.render(ctx),
        MigrationOp::ExecuteSql(op) => op.render(ctx),
        MigrationOp::ModifyTable(op) => op.render(ctx),
        MigrationOp::Custom(custom) => {
            let renderer = ctx
                .settings
                .custom_renderers
                .get(custom.kind())
                .ok_or_else(|| RenderError::UnsupportedOperation(custom.kind().to_string()))?;
            renderer(custom.as_ref(), ctx)
        }
    }
}

/// Renders one operation and joins its lines.
pub fn render_op_text(
    ctx: &mut RenderContext<'_>,
    op: &MigrationOp,
) -> Result<String, RenderError> {
    Ok(render_op(ctx, op)?.join("\n"))
}

impl Render for ModifyTableOps {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        if self.ops.is_empty() {
            return Ok(vec!["pass".to_string()]);
        }

        if !ctx.settings.render_as_batch {
            let mut lines = Vec::new();
            for op in &self.ops {
                lines.extend(render_op(ctx, op)?);
            }
            return Ok(lines);
        }

        // The batch block always targets the bare migration module and
        // spells out the schema, present or not.
        let mut lines = vec![format!(
            "with op.batch_alter_table({}, schema={}) as batch_op:",
            py_ident(&self.table_name),
            py_opt_ident(self.schema.as_ref())
        )];
        let body = ctx.with_batch_prefix(BATCH_PREFIX, |ctx| {
            let mut body = Vec::new();
            for op in &self.ops {
                body.extend(render_op(ctx, op)?);
            }
            Ok(body)
        })?;
        lines.extend(body);
        // Trailing blank line closes the indented block.
        lines.push(String::new());
        Ok(lines)
    }
}

impl Render for ExecuteSqlOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        match &self.sqltext {
            Expr::Value(Value::String(sql)) => Ok(vec![format!(
                "{}execute({})",
                ctx.migration_prefix(),
                py_str(sql)
            )]),
            _ => Err(RenderError::NotImplemented(
                "execute with a non-string payload; inline a plain SQL string".to_string(),
            )),
        }
    }
}
