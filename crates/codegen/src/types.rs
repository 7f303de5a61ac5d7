//! Qualified rendering of type references and dialect import tracking.

use model::schema::types::{TypeNamespace, TypeRef};

use crate::context::RenderContext;
use crate::literal::py_repr;
use crate::settings::RenderItem;

/// Renders a type reference as a qualified constructor call, recording
/// the dialect import when the type lives in a dialect module.
pub fn repr_type(ctx: &mut RenderContext<'_>, type_ref: &TypeRef) -> String {
    if let Some(rendered) = ctx.user_override(RenderItem::Type(type_ref)) {
        return rendered;
    }

    let constructor = type_constructor(type_ref);
    match &type_ref.namespace {
        TypeNamespace::Dialect(dialect) => {
            ctx.add_import(format!("from sqlalchemy.dialects import {dialect}"));
            format!("{dialect}.{constructor}")
        }
        TypeNamespace::Core => format!("{}{constructor}", ctx.sqlalchemy_prefix()),
        TypeNamespace::UserDefined { module } => match &ctx.settings.user_module_prefix {
            Some(prefix) => format!("{prefix}{constructor}"),
            None => format!("{module}.{constructor}"),
        },
    }
}

/// Constructor call with positional arguments first, then keyword
/// arguments in key order. Argument-free types keep their parentheses.
fn type_constructor(type_ref: &TypeRef) -> String {
    let mut args: Vec<String> = type_ref.args.iter().map(py_repr).collect();
    args.extend(
        type_ref
            .kwargs
            .iter()
            .map(|(key, value)| format!("{key}={}", py_repr(value))),
    );
    format!("{}({})", type_ref.name, args.join(", "))
}
