//! Literal formatting for the generated script's host language.
//!
//! Everything the renderers embed in output text funnels through these
//! helpers so quoting and escaping stay consistent across operations.

use model::core::ident::{Ident, NameRef};
use model::core::value::Value;

use crate::context::RenderContext;

/// Quotes a string as a script literal: single quotes unless the text
/// contains a single quote and no double quote, control characters
/// escaped, multi-byte text passed through untouched.
pub fn py_str(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Renders a scalar value as a script literal.
pub fn py_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Boolean(v) => py_bool(*v).to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => py_float(*v),
        Value::String(v) => py_str(v),
    }
}

pub fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn py_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value == value.trunc() && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Quotes an identifier for emission. The quote marker on `Ident` is
/// source-schema metadata and does not change the output.
pub fn py_ident(ident: &Ident) -> String {
    py_str(ident.as_str())
}

pub fn py_opt_ident(ident: Option<&Ident>) -> String {
    match ident {
        Some(ident) => py_ident(ident),
        None => "None".to_string(),
    }
}

/// Renders a list of identifiers as a script list literal.
pub fn py_ident_list(idents: &[Ident]) -> String {
    let items = idents.iter().map(py_ident).collect::<Vec<_>>().join(", ");
    format!("[{items}]")
}

/// Renders a name reference. Convention-generated names come out as a
/// call through the convention-aware wrapper so they are re-derived
/// when the script executes; the wrapper honors the active batch
/// prefix.
pub fn py_name(ctx: &RenderContext<'_>, name: &NameRef) -> String {
    match name {
        NameRef::Plain(ident) => py_ident(ident),
        NameRef::Generated(ident) => {
            format!("{}f({})", ctx.migration_prefix(), py_ident(ident))
        }
    }
}

pub fn py_opt_name(ctx: &RenderContext<'_>, name: Option<&NameRef>) -> String {
    match name {
        Some(name) => py_name(ctx, name),
        None => "None".to_string(),
    }
}
