//! Index operations.

use model::ops::{CreateIndexOp, DropIndexOp, IndexElement};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::literal::{py_bool, py_ident, py_name};
use crate::render::Render;
use crate::render::expr::{render_potential_expr, render_sql_expr};

impl Render for CreateIndexOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let mut elements = Vec::new();
        for element in &self.elements {
            elements.push(match element {
                IndexElement::Column(name) => py_ident(name),
                IndexElement::Expr(expr) => render_sql_expr(ctx, expr, true)?,
            });
        }

        let mut kwargs = String::new();
        for (key, value) in &self.options {
            let rendered = render_potential_expr(ctx, value, true)?;
            kwargs.push_str(&format!(", {key}={rendered}"));
        }

        let name = py_name(ctx, &self.index_name);
        // Inside a batch block the table is implied by the enclosing
        // scope, so the table and schema arguments disappear.
        let text = if ctx.in_batch() {
            format!(
                "{}create_index({name}, [{}], unique={}{kwargs})",
                ctx.migration_prefix(),
                elements.join(", "),
                py_bool(self.unique)
            )
        } else {
            let schema = match &self.schema {
                Some(schema) => format!(", schema={}", py_ident(schema)),
                None => String::new(),
            };
            format!(
                "{}create_index({name}, {}, [{}], unique={}{schema}{kwargs})",
                ctx.migration_prefix(),
                py_ident(&self.table_name),
                elements.join(", "),
                py_bool(self.unique)
            )
        };
        Ok(vec![text])
    }
}

impl Render for DropIndexOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let name = py_name(ctx, &self.index_name);
        let text = if ctx.in_batch() {
            format!("{}drop_index({name})", ctx.migration_prefix())
        } else {
            let schema = match &self.schema {
                Some(schema) => format!(", schema={}", py_ident(schema)),
                None => String::new(),
            };
            format!(
                "{}drop_index({name}, table_name={}{schema})",
                ctx.migration_prefix(),
                py_ident(&self.table_name)
            )
        };
        Ok(vec![text])
    }
}
