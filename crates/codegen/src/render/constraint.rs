//! Constraint fragments and the constraint-level operations.

use model::core::ident::Ident;
use model::ops::{
    CreateCheckConstraintOp, CreateForeignKeyOp, CreatePrimaryKeyOp, CreateUniqueConstraintOp,
    DropConstraintOp,
};
use model::schema::constraint::{
    CheckDef, ColumnSpec, ForeignKeyDef, PrimaryKeyDef, TableConstraint, UniqueDef,
};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::literal::{py_bool, py_ident, py_ident_list, py_name, py_opt_name, py_str};
use crate::render::Render;
use crate::render::expr::render_sql_expr;
use crate::settings::RenderItem;

/// Renders a table-level constraint for embedding in a create-table
/// argument list. `None` means the constraint has nothing to emit (an
/// empty primary key, or a check a column type already owns).
pub fn render_table_constraint(
    ctx: &mut RenderContext<'_>,
    constraint: &TableConstraint,
) -> Result<Option<String>, RenderError> {
    match constraint {
        TableConstraint::PrimaryKey(pk) => render_primary_key(ctx, pk),
        TableConstraint::ForeignKey(fk) => render_foreign_key(ctx, fk).map(Some),
        TableConstraint::Unique(uq) => {
            if let Some(rendered) = ctx.user_override(RenderItem::Unique(uq)) {
                return Ok(Some(rendered));
            }
            Ok(Some(render_unique(ctx, uq, UniqueForm::Inline)))
        }
        TableConstraint::Check(check) => render_check(ctx, check),
    }
}

fn render_primary_key(
    ctx: &mut RenderContext<'_>,
    pk: &PrimaryKeyDef,
) -> Result<Option<String>, RenderError> {
    if let Some(rendered) = ctx.user_override(RenderItem::PrimaryKey(pk)) {
        return Ok(Some(rendered));
    }
    if pk.columns.is_empty() {
        return Ok(None);
    }

    let mut args: Vec<String> = pk.columns.iter().map(|key| py_str(key)).collect();
    if let Some(name) = &pk.name {
        args.push(format!("name={}", py_name(ctx, name)));
    }
    Ok(Some(format!(
        "{}PrimaryKeyConstraint({})",
        ctx.sqlalchemy_prefix(),
        args.join(", ")
    )))
}

fn render_foreign_key(
    ctx: &mut RenderContext<'_>,
    fk: &ForeignKeyDef,
) -> Result<String, RenderError> {
    if let Some(rendered) = ctx.user_override(RenderItem::ForeignKey(fk)) {
        return Ok(rendered);
    }

    let mut opts: Vec<(&str, String)> = Vec::new();
    if let Some(name) = &fk.name {
        opts.push(("name", py_name(ctx, name)));
    }
    if let Some(onupdate) = &fk.onupdate {
        opts.push(("onupdate", py_str(onupdate)));
    }
    if let Some(ondelete) = &fk.ondelete {
        opts.push(("ondelete", py_str(ondelete)));
    }
    if let Some(initially) = &fk.initially {
        opts.push(("initially", py_str(initially)));
    }
    if let Some(deferrable) = fk.deferrable {
        opts.push(("deferrable", py_bool(deferrable).to_string()));
    }
    if let Some(use_alter) = fk.use_alter {
        opts.push(("use_alter", py_bool(use_alter).to_string()));
    }

    let cols = fk
        .columns
        .iter()
        .map(py_ident)
        .collect::<Vec<_>>()
        .join(", ");
    let mut refcols = Vec::new();
    for spec in &fk.refcolumns {
        refcols.push(py_str(&fk_colspec(fk, spec)?));
    }

    let mut args = vec![format!("[{cols}]"), format!("[{}]", refcols.join(", "))];
    args.extend(opts.into_iter().map(|(key, value)| format!("{key}={value}")));

    Ok(format!(
        "{}ForeignKeyConstraint({})",
        ctx.sqlalchemy_prefix(),
        args.join(", ")
    ))
}

/// Resolves a remote column spec without dereferencing the remote
/// table. The canonical column name is substituted only when the
/// target table is already known to the constraint's catalog; an
/// unknown table passes through verbatim.
fn fk_colspec(fk: &ForeignKeyDef, spec: &ColumnSpec) -> Result<String, RenderError> {
    let tokens = spec.tokens();
    if tokens.len() < 2 {
        return Err(RenderError::MalformedReference(format!(
            "foreign key target '{}' must be qualified as table.column",
            spec.as_str()
        )));
    }

    let colname = tokens[tokens.len() - 1];
    let tname = tokens[tokens.len() - 2];

    let default_schema = fk
        .catalog
        .as_ref()
        .and_then(|catalog| catalog.default_schema.as_deref());
    let table_fullname = match default_schema {
        Some(schema) if tokens.len() == 2 => format!("{schema}.{tname}"),
        _ => tokens[..tokens.len() - 1].join("."),
    };

    let mut colname = colname.to_string();
    if let Some(catalog) = &fk.catalog {
        if let Some(table) = catalog.table(&table_fullname) {
            colname = table
                .column_name(&colname)
                .ok_or_else(|| {
                    RenderError::MalformedReference(format!(
                        "table '{table_fullname}' has no column keyed '{colname}'"
                    ))
                })?
                .to_string();
        }
    }

    Ok(format!("{table_fullname}.{colname}"))
}

fn render_check(
    ctx: &mut RenderContext<'_>,
    check: &CheckDef,
) -> Result<Option<String>, RenderError> {
    if let Some(rendered) = ctx.user_override(RenderItem::Check(check)) {
        return Ok(Some(rendered));
    }
    // A check owned by a column type is emitted with the column;
    // repeating it here would duplicate the constraint.
    if check.from_column_type {
        return Ok(None);
    }

    let sqltext = render_sql_expr(ctx, &check.sqltext, false)?;
    let text = match &check.name {
        Some(name) => format!(
            "{}CheckConstraint({sqltext}, name={})",
            ctx.sqlalchemy_prefix(),
            py_name(ctx, name)
        ),
        None => format!("{}CheckConstraint({sqltext})", ctx.sqlalchemy_prefix()),
    };
    Ok(Some(text))
}

/// Placement of a unique constraint: embedded in a create-table call
/// or emitted as a freestanding operation.
pub(crate) enum UniqueForm<'a> {
    Inline,
    Alter {
        table: &'a Ident,
        schema: Option<&'a Ident>,
    },
}

/// Shared rendering for unique constraints. The two forms differ in
/// name placement and in whether table and schema arguments appear.
pub(crate) fn render_unique(
    ctx: &mut RenderContext<'_>,
    uq: &UniqueDef,
    form: UniqueForm<'_>,
) -> String {
    let mut opts: Vec<(&str, String)> = Vec::new();
    if let Some(deferrable) = &uq.deferrable {
        opts.push(("deferrable", py_str(deferrable)));
    }
    if let Some(initially) = &uq.initially {
        opts.push(("initially", py_str(initially)));
    }

    match form {
        UniqueForm::Alter { table, schema } => {
            if !ctx.in_batch() {
                if let Some(schema) = schema {
                    opts.push(("schema", py_ident(schema)));
                }
            }
            let mut args = vec![py_opt_name(ctx, uq.name.as_ref())];
            if !ctx.in_batch() {
                args.push(py_ident(table));
            }
            args.push(py_ident_list(&uq.columns));
            args.extend(opts.into_iter().map(|(key, value)| format!("{key}={value}")));
            format!(
                "{}create_unique_constraint({})",
                ctx.migration_prefix(),
                args.join(", ")
            )
        }
        UniqueForm::Inline => {
            let mut args: Vec<String> = uq.columns.iter().map(py_ident).collect();
            if let Some(name) = &uq.name {
                opts.push(("name", py_name(ctx, name)));
            }
            args.extend(opts.into_iter().map(|(key, value)| format!("{key}={value}")));
            format!(
                "{}UniqueConstraint({})",
                ctx.sqlalchemy_prefix(),
                args.join(", ")
            )
        }
    }
}

impl Render for CreateUniqueConstraintOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        Ok(vec![render_unique(
            ctx,
            &self.constraint,
            UniqueForm::Alter {
                table: &self.table_name,
                schema: self.schema.as_ref(),
            },
        )])
    }
}

impl Render for CreateForeignKeyOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let mut args = vec![
            py_opt_name(ctx, self.constraint_name.as_ref()),
            py_ident(&self.source_table),
            py_ident(&self.referent_table),
            py_ident_list(&self.local_cols),
            py_ident_list(&self.remote_cols),
        ];
        if let Some(schema) = &self.source_schema {
            args.push(format!("source_schema={}", py_ident(schema)));
        }
        if let Some(schema) = &self.referent_schema {
            args.push(format!("referent_schema={}", py_ident(schema)));
        }
        if let Some(onupdate) = &self.onupdate {
            args.push(format!("onupdate={}", py_str(onupdate)));
        }
        if let Some(ondelete) = &self.ondelete {
            args.push(format!("ondelete={}", py_str(ondelete)));
        }
        if let Some(initially) = &self.initially {
            args.push(format!("initially={}", py_str(initially)));
        }
        if let Some(deferrable) = self.deferrable {
            args.push(format!("deferrable={}", py_bool(deferrable)));
        }
        if let Some(use_alter) = self.use_alter {
            args.push(format!("use_alter={}", py_bool(use_alter)));
        }
        Ok(vec![format!(
            "{}create_foreign_key({})",
            ctx.migration_prefix(),
            args.join(", ")
        )])
    }
}

impl Render for CreatePrimaryKeyOp {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        Err(RenderError::NotImplemented(
            "freestanding primary key creation".to_string(),
        ))
    }
}

impl Render for CreateCheckConstraintOp {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        Err(RenderError::NotImplemented(
            "freestanding check constraint creation".to_string(),
        ))
    }
}

impl Render for DropConstraintOp {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<String>, RenderError> {
        let constraint_type = match &self.constraint_type {
            Some(constraint_type) => py_str(constraint_type),
            None => "None".to_string(),
        };
        let name = py_name(ctx, &self.constraint_name);
        let text = if ctx.in_batch() {
            format!(
                "{}drop_constraint({name}, type_={constraint_type})",
                ctx.migration_prefix()
            )
        } else {
            let schema = match &self.schema {
                Some(schema) => format!(", schema='{}'", schema.as_str()),
                None => String::new(),
            };
            format!(
                "{}drop_constraint({name}, '{}'{schema}, type_={constraint_type})",
                ctx.migration_prefix(),
                self.table_name.as_str()
            )
        };
        Ok(vec![text])
    }
}
