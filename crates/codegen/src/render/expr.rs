//! Compilation of raw SQL expressions into inline script text.

use model::core::expr::{Expr, SqlExpr};

use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::RenderError;
use crate::literal::{py_repr, py_str};

/// Splices an expression's bound parameters into its text fragments as
/// dialect literals.
pub fn compile_sql_expr(dialect: &dyn Dialect, expr: &SqlExpr) -> Result<String, RenderError> {
    if !expr.is_well_formed() {
        return Err(RenderError::MalformedReference(format!(
            "expression carries {} fragments for {} parameters",
            expr.fragments.len(),
            expr.params.len()
        )));
    }

    let mut sql = String::new();
    for (i, fragment) in expr.fragments.iter().enumerate() {
        sql.push_str(fragment);
        if let Some(param) = expr.params.get(i) {
            let literal = dialect.literal(param).ok_or_else(|| {
                RenderError::MalformedReference(format!(
                    "{} has no literal form for {param:?}",
                    dialect.name()
                ))
            })?;
            sql.push_str(&literal);
        }
    }
    Ok(sql)
}

/// Compiles a raw expression and quotes it for the generated script,
/// optionally wrapped in the schema library's text constructor.
pub fn render_sql_expr(
    ctx: &mut RenderContext<'_>,
    expr: &SqlExpr,
    wrap_in_text: bool,
) -> Result<String, RenderError> {
    let sql = compile_sql_expr(ctx.dialect, expr)?;
    if wrap_in_text {
        Ok(format!("{}text({})", ctx.sqlalchemy_prefix(), py_str(&sql)))
    } else {
        Ok(py_str(&sql))
    }
}

/// Renders a value that is either a plain literal or a raw expression.
pub fn render_potential_expr(
    ctx: &mut RenderContext<'_>,
    value: &Expr,
    wrap_in_text: bool,
) -> Result<String, RenderError> {
    match value {
        Expr::Sql(expr) => render_sql_expr(ctx, expr, wrap_in_text),
        Expr::Value(value) => Ok(py_repr(value)),
    }
}
