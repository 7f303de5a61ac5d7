//! Column fragments and the column-level operations.

use model::ops::{AddColumnOp, AlterColumnOp, DropColumnOp};
use model::schema::column::{ColumnDef, DefaultChange, ServerDefault};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::literal::{py_bool, py_ident, py_str};
use crate::render::Render;
use crate::render::expr::render_sql_expr;
use crate::settings::RenderItem;
use crate::types::repr_type;

/// Renders a column definition as a schema-library constructor call.
pub fn render_column(
    ctx: &mut RenderContext<'_>,
    column: &ColumnDef,
) -> Result<String, RenderError> {
    if let Some(rendered) = ctx.user_override(RenderItem::Column(column)) {
        return Ok(rendered);
    }

    let mut opts: Vec<(&str, String)> = Vec::new();
    if let Some(default) = &column.server_default {
        let rendered = render_server_default(ctx, Some(default))?;
        if !rendered.is_empty() {
            opts.push(("server_default", rendered));
        }
    }
    // Autoincrement is the engine default; only its suppression is
    // worth writing out.
    if column.autoincrement == Some(false) {
        opts.push(("autoincrement", py_bool(false).to_string()));
    }
    if let Some(nullable) = column.nullable {
        opts.push(("nullable", py_bool(nullable).to_string()));
    }

    let data_type = repr_type(ctx, &column.data_type);
    let mut text = format!(
        "{}Column({}, {data_type}",
        ctx.sqlalchemy_prefix(),
        py_ident(&column.name)
    );
    for (key, value) in opts {
        text.push_str(&format!(", {key}={value}"));
    }
    text.push(')');
    Ok(text)
}

/// Renders a server default for embedding as a keyword value. Plain
/// text defaults lose one layer of surrounding quotes before being
/// re-quoted; expression defaults compile through the dialect.
pub fn render_server_default(
    ctx: &mut RenderContext<'_>,
    default: Option<&ServerDefault>,
) -> Result<String, RenderError> {
    let Some(default) = default else {
        return Ok("None".to_string());
    };
    if let Some(rendered) = ctx.user_override(RenderItem::ServerDefault(default)) {
        return Ok(rendered);
    }
    match default {
        ServerDefault::Text(text) => Ok(py_str(strip_default_quotes(text))),
        ServerDefault::Expr(expr) => render_sql_expr(ctx, expr, true),
    }
}

fn strip_default_quotes(text: &str) -> &str {
    let text = text.strip_prefix('\'').unwrap_or(text);
    text.strip_suffix('\'').unwrap_or(text)
}

impl Render for AddColumnOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let column = render_column(ctx, &self.column)?;
        let text = if ctx.in_batch() {
            format!("{}add_column({column})", ctx.migration_prefix())
        } else {
            let mut text = format!(
                "{}add_column({}, {column}",
                ctx.migration_prefix(),
                py_ident(&self.table_name)
            );
            if let Some(schema) = &self.schema {
                text.push_str(&format!(", schema={}", py_ident(schema)));
            }
            text.push(')');
            text
        };
        Ok(vec![text])
    }
}

impl Render for DropColumnOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let text = if ctx.in_batch() {
            format!(
                "{}drop_column({})",
                ctx.migration_prefix(),
                py_ident(&self.column_name)
            )
        } else {
            let mut text = format!(
                "{}drop_column({}, {}",
                ctx.migration_prefix(),
                py_ident(&self.table_name),
                py_ident(&self.column_name)
            );
            if let Some(schema) = &self.schema {
                text.push_str(&format!(", schema={}", py_ident(schema)));
            }
            text.push(')');
            text
        };
        Ok(vec![text])
    }
}

impl Render for AlterColumnOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let indent = " ".repeat(11);
        let mut text = if ctx.in_batch() {
            format!(
                "{}alter_column({}",
                ctx.migration_prefix(),
                py_ident(&self.column_name)
            )
        } else {
            format!(
                "{}alter_column({}, {}",
                ctx.migration_prefix(),
                py_ident(&self.table_name),
                py_ident(&self.column_name)
            )
        };

        // The existing type is always restated so the script does not
        // depend on reflection at execution time.
        let existing_type = repr_type(ctx, &self.existing_type);
        text.push_str(&format!(",\n{indent}existing_type={existing_type}"));

        match &self.modify_server_default {
            DefaultChange::Unchanged => {}
            DefaultChange::Remove => {
                text.push_str(&format!(",\n{indent}server_default=None"));
            }
            DefaultChange::Set(default) => {
                let rendered = render_server_default(ctx, Some(default))?;
                text.push_str(&format!(",\n{indent}server_default={rendered}"));
            }
        }
        if let Some(new_type) = &self.modify_type {
            let rendered = repr_type(ctx, new_type);
            text.push_str(&format!(",\n{indent}type_={rendered}"));
        }
        if let Some(nullable) = self.modify_nullable {
            text.push_str(&format!(",\n{indent}nullable={}", py_bool(nullable)));
        }
        if let Some(existing_nullable) = self.existing_nullable {
            text.push_str(&format!(
                ",\n{indent}existing_nullable={}",
                py_bool(existing_nullable)
            ));
        }
        if let Some(existing_default) = &self.existing_server_default {
            let rendered = render_server_default(ctx, Some(existing_default))?;
            text.push_str(&format!(",\n{indent}existing_server_default={rendered}"));
        }
        if !ctx.in_batch() {
            if let Some(schema) = &self.schema {
                text.push_str(&format!(",\n{indent}schema={}", py_ident(schema)));
            }
        }
        text.push(')');
        Ok(vec![text])
    }
}
