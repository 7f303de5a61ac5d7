//! Whole-table operations.

use model::ops::{CreateTableOp, DropTableOp};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::literal::{py_ident, py_repr};
use crate::render::Render;
use crate::render::column::render_column;
use crate::render::constraint::render_table_constraint;

impl Render for CreateTableOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        // Columns keep their declaration order; constraints sort by
        // rendered text so regeneration is stable.
        let mut args = Vec::new();
        for column in &self.columns {
            let rendered = render_column(ctx, column)?;
            if !rendered.is_empty() {
                args.push(rendered);
            }
        }

        let mut constraints = Vec::new();
        for constraint in &self.constraints {
            if let Some(rendered) = render_table_constraint(ctx, constraint)? {
                constraints.push(rendered);
            }
        }
        constraints.sort();
        args.extend(constraints);

        let args = if args.len() > ctx.settings.max_positional_args {
            format!("*[{}]", args.join(",\n"))
        } else {
            args.join(",\n")
        };

        let mut text = format!(
            "{}create_table({},\n{args}",
            ctx.migration_prefix(),
            py_ident(&self.table_name)
        );
        if let Some(schema) = &self.schema {
            text.push_str(&format!(",\nschema={}", py_ident(schema)));
        }
        for (key, value) in &self.options {
            text.push_str(&format!(",\n{}={}", key.replace(' ', "_"), py_repr(value)));
        }
        text.push_str("\n)");
        Ok(vec![text])
    }
}

impl Render for DropTableOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let mut text = format!(
            "{}drop_table({}",
            ctx.migration_prefix(),
            py_ident(&self.table_name)
        );
        if let Some(schema) = &self.schema {
            text.push_str(&format!(", schema={}", py_ident(schema)));
        }
        text.push(')');
        Ok(vec![text])
    }
}
