use std::any::Any;
use std::sync::Arc;

use codegen::context::RenderContext;
use codegen::dialect::Postgres;
use codegen::error::RenderError;
use codegen::render::{render_op, render_op_text};
use codegen::settings::{RenderItem, RenderItemHook, RenderSettings};
use model::core::expr::SqlExpr;
use model::core::ident::NameRef;
use model::ops::{
    AddColumnOp, AlterColumnOp, CreateCheckConstraintOp, CreateForeignKeyOp, CreateIndexOp,
    CreatePrimaryKeyOp, CreateTableOp, CreateUniqueConstraintOp, CustomOperation, DropColumnOp,
    DropConstraintOp, DropIndexOp, DropTableOp, ExecuteSqlOp, MigrationOp, ModifyTableOps,
};
use model::schema::catalog::TableCatalog;
use model::schema::column::{ColumnDef, DefaultChange, ServerDefault};
use model::schema::constraint::{
    ForeignKeyDef, PrimaryKeyDef, TableConstraint, UniqueDef,
};
use model::schema::types::TypeRef;

fn render_one(settings: &RenderSettings, op: impl Into<MigrationOp>) -> String {
    let dialect = Postgres;
    let mut ctx = RenderContext::new(settings, &dialect);
    render_op_text(&mut ctx, &op.into()).unwrap()
}

fn render_lines(settings: &RenderSettings, op: impl Into<MigrationOp>) -> Vec<String> {
    let dialect = Postgres;
    let mut ctx = RenderContext::new(settings, &dialect);
    render_op(&mut ctx, &op.into()).unwrap()
}

#[test]
fn create_table_lists_columns_then_constraints() {
    let op = CreateTableOp::new("t")
        .column(ColumnDef::new("a", TypeRef::core("Integer")).nullable(true))
        .column(ColumnDef::new("b", TypeRef::core("String").arg(50)).nullable(false))
        .constraint(TableConstraint::Unique(
            UniqueDef::new(["a"]).name(NameRef::plain("uq_a")),
        ));

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_table('t',
sa.Column('a', sa.Integer(), nullable=True),
sa.Column('b', sa.String(50), nullable=False),
sa.UniqueConstraint('a', name='uq_a')
)"
    );
}

#[test]
fn create_table_constraints_sort_by_rendered_text() {
    let op = CreateTableOp::new("t")
        .column(ColumnDef::new("id", TypeRef::core("Integer")))
        .constraint(TableConstraint::Unique(UniqueDef::new(["id"])))
        .constraint(TableConstraint::PrimaryKey(PrimaryKeyDef::new(["id"])));

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_table('t',
sa.Column('id', sa.Integer()),
sa.PrimaryKeyConstraint('id'),
sa.UniqueConstraint('id')
)"
    );
}

#[test]
fn create_table_renders_schema_then_options() {
    let op = CreateTableOp::new("t")
        .schema("analytics")
        .column(ColumnDef::new("id", TypeRef::core("Integer")))
        .option("mysql engine", "InnoDB");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_table('t',
sa.Column('id', sa.Integer()),
schema='analytics',
mysql_engine='InnoDB'
)"
    );
}

#[test]
fn create_table_past_the_argument_ceiling_uses_the_spread_form() {
    let settings = RenderSettings {
        max_positional_args: 2,
        ..Default::default()
    };
    let op = CreateTableOp::new("t")
        .column(ColumnDef::new("a", TypeRef::core("Integer")))
        .column(ColumnDef::new("b", TypeRef::core("Integer")))
        .column(ColumnDef::new("c", TypeRef::core("Integer")));

    assert_eq!(
        render_one(&settings, op),
        "op.create_table('t',
*[sa.Column('a', sa.Integer()),
sa.Column('b', sa.Integer()),
sa.Column('c', sa.Integer())]
)"
    );
}

#[test]
fn create_table_resolves_referenced_columns_through_the_catalog() {
    let mut catalog = TableCatalog::with_default_schema("public");
    catalog
        .add_table("public.accounts")
        .add_column("id", "account_id");

    let op = CreateTableOp::new("orders")
        .column(ColumnDef::new("account_id", TypeRef::core("Integer")))
        .constraint(TableConstraint::ForeignKey(
            ForeignKeyDef::new(["account_id"], ["accounts.id"]).catalog(Arc::new(catalog)),
        ));

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_table('orders',
sa.Column('account_id', sa.Integer()),
sa.ForeignKeyConstraint(['account_id'], ['public.accounts.account_id'])
)"
    );
}

#[test]
fn drop_table_renders_with_and_without_schema() {
    let settings = RenderSettings::default();
    assert_eq!(render_one(&settings, DropTableOp::new("t")), "op.drop_table('t')");
    assert_eq!(
        render_one(&settings, DropTableOp::new("t").schema("s")),
        "op.drop_table('t', schema='s')"
    );
}

#[test]
fn add_column_names_the_table_outside_batch_mode() {
    let op = AddColumnOp::new(
        "t",
        ColumnDef::new("c", TypeRef::core("Integer")).nullable(true),
    )
    .schema("s");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.add_column('t', sa.Column('c', sa.Integer(), nullable=True), schema='s')"
    );
}

#[test]
fn drop_column_names_table_and_column() {
    assert_eq!(
        render_one(&RenderSettings::default(), DropColumnOp::new("t", "c")),
        "op.drop_column('t', 'c')"
    );
}

#[test]
fn column_defaults_lose_one_layer_of_quotes() {
    let op = AddColumnOp::new(
        "t",
        ColumnDef::new("x", TypeRef::core("Text")).default_text("'now()'"),
    );
    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.add_column('t', sa.Column('x', sa.Text(), server_default='now()'))"
    );
}

#[test]
fn expression_defaults_compile_through_the_dialect() {
    let op = AddColumnOp::new(
        "t",
        ColumnDef::new("x", TypeRef::core("Text"))
            .server_default(ServerDefault::Expr(SqlExpr::raw("now()"))),
    );
    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.add_column('t', sa.Column('x', sa.Text(), server_default=sa.text('now()')))"
    );
}

#[test]
fn autoincrement_renders_only_when_disabled() {
    let settings = RenderSettings::default();
    let enabled = AddColumnOp::new(
        "t",
        ColumnDef::new("id", TypeRef::core("Integer")).autoincrement(true),
    );
    assert_eq!(
        render_one(&settings, enabled),
        "op.add_column('t', sa.Column('id', sa.Integer()))"
    );

    let disabled = AddColumnOp::new(
        "t",
        ColumnDef::new("id", TypeRef::core("Integer")).autoincrement(false),
    );
    assert_eq!(
        render_one(&settings, disabled),
        "op.add_column('t', sa.Column('id', sa.Integer(), autoincrement=False))"
    );
}

#[test]
fn alter_column_with_only_a_nullable_change_stays_minimal() {
    let op = AlterColumnOp::new("t", "c", TypeRef::core("Integer")).nullable(false);

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.alter_column('t', 'c',
           existing_type=sa.Integer(),
           nullable=False)"
    );
}

#[test]
fn alter_column_renders_every_change_in_declared_order() {
    let op = AlterColumnOp::new("t", "c", TypeRef::core("Integer"))
        .server_default(DefaultChange::Set(ServerDefault::Text("0".to_string())))
        .new_type(TypeRef::core("BigInteger"))
        .nullable(true)
        .existing_nullable(false)
        .existing_server_default(ServerDefault::Expr(SqlExpr::raw("now()")))
        .schema("s");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.alter_column('t', 'c',
           existing_type=sa.Integer(),
           server_default='0',
           type_=sa.BigInteger(),
           nullable=True,
           existing_nullable=False,
           existing_server_default=sa.text('now()'),
           schema='s')"
    );
}

#[test]
fn alter_column_spells_out_default_removal() {
    let op = AlterColumnOp::new("t", "c", TypeRef::core("Integer"))
        .server_default(DefaultChange::Remove);

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.alter_column('t', 'c',
           existing_type=sa.Integer(),
           server_default=None)"
    );
}

#[test]
fn create_index_renders_expressions_and_options() {
    let op = CreateIndexOp::new(NameRef::generated("ix_t_lower_email"), "t")
        .element(SqlExpr::raw("lower(email)"))
        .element("active")
        .option("postgresql_using", "gin");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_index(op.f('ix_t_lower_email'), 't', [sa.text('lower(email)'), 'active'], \
         unique=False, postgresql_using='gin')"
    );
}

#[test]
fn unique_index_spells_out_uniqueness() {
    let op = CreateIndexOp::new(NameRef::plain("ix_a"), "t")
        .element("a")
        .unique()
        .schema("s");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_index('ix_a', 't', ['a'], unique=True, schema='s')"
    );
}

#[test]
fn drop_index_names_the_table_outside_batch_mode() {
    let op = DropIndexOp::new(NameRef::generated("ix_a"), "t").schema("s");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.drop_index(op.f('ix_a'), table_name='t', schema='s')"
    );
}

#[test]
fn batch_drop_index_omits_table_and_schema() {
    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let op = ModifyTableOps::new("t").op(DropIndexOp::new(NameRef::generated("ix_a"), "t").schema("s"));

    let lines = render_lines(&settings, op);
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    assert_eq!(
        lines,
        vec![
            "with op.batch_alter_table('t', schema=None) as batch_op:",
            "batch_op.drop_index(batch_op.f('ix_a'))",
            "",
        ]
    );
}

#[test]
fn batch_blocks_spell_out_their_schema() {
    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let op = ModifyTableOps::new("t")
        .schema("s")
        .op(DropColumnOp::new("t", "c").schema("s"));

    let lines = render_lines(&settings, op);
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    assert_eq!(
        lines,
        vec![
            "with op.batch_alter_table('t', schema='s') as batch_op:",
            "batch_op.drop_column('c')",
            "",
        ]
    );
}

#[test]
fn modify_table_without_batch_mode_flattens_its_children() {
    let op = ModifyTableOps::new("t")
        .op(DropColumnOp::new("t", "c"))
        .op(AddColumnOp::new(
            "t",
            ColumnDef::new("d", TypeRef::core("Integer")),
        ));

    let lines = render_lines(&RenderSettings::default(), op);
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    assert_eq!(
        lines,
        vec![
            "op.drop_column('t', 'c')",
            "op.add_column('t', sa.Column('d', sa.Integer()))",
        ]
    );
}

#[test]
fn empty_modify_table_renders_pass_in_both_modes() {
    for render_as_batch in [false, true] {
        let settings = RenderSettings {
            render_as_batch,
            ..Default::default()
        };
        let lines = render_lines(&settings, ModifyTableOps::new("t"));
        assert_eq!(lines, vec!["pass".to_string()]);
    }
}

#[test]
fn batch_prefix_is_cleared_even_when_a_child_fails() {
    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let dialect = Postgres;
    let mut ctx = RenderContext::new(&settings, &dialect);

    let failing = ModifyTableOps::new("t").op(CreatePrimaryKeyOp::new("t", ["id"]));
    let err = render_op(&mut ctx, &failing.into()).unwrap_err();
    assert!(matches!(err, RenderError::NotImplemented(_)));

    assert!(!ctx.in_batch());
    assert_eq!(
        render_op_text(&mut ctx, &DropTableOp::new("t").into()).unwrap(),
        "op.drop_table('t')"
    );
}

#[test]
fn create_unique_constraint_renders_table_schema_and_options() {
    let op = CreateUniqueConstraintOp::new(
        "t",
        UniqueDef::new(["a", "b"])
            .name(NameRef::plain("uq_ab"))
            .deferrable("DEFERRABLE"),
    )
    .schema("s");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_unique_constraint('uq_ab', 't', ['a', 'b'], deferrable='DEFERRABLE', schema='s')"
    );
}

#[test]
fn batch_create_unique_constraint_drops_table_and_schema() {
    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let op = ModifyTableOps::new("t").op(CreateUniqueConstraintOp::new(
        "t",
        UniqueDef::new(["a"]).name(NameRef::generated("uq_a")),
    ));

    let lines = render_lines(&settings, op);
    assert_eq!(
        lines[1],
        "batch_op.create_unique_constraint(batch_op.f('uq_a'), ['a'])"
    );
}

#[test]
fn create_foreign_key_keeps_its_argument_order() {
    let op = CreateForeignKeyOp::new("orders", "accounts", ["account_id"], ["id"])
        .name(NameRef::plain("fk_orders_accounts"))
        .ondelete("CASCADE")
        .deferrable(true);

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_foreign_key('fk_orders_accounts', 'orders', 'accounts', ['account_id'], \
         ['id'], ondelete='CASCADE', deferrable=True)"
    );
}

#[test]
fn anonymous_foreign_keys_pass_a_literal_none() {
    let op = CreateForeignKeyOp::new("orders", "accounts", ["account_id"], ["id"])
        .source_schema("sales")
        .referent_schema("public");

    assert_eq!(
        render_one(&RenderSettings::default(), op),
        "op.create_foreign_key(None, 'orders', 'accounts', ['account_id'], ['id'], \
         source_schema='sales', referent_schema='public')"
    );
}

#[test]
fn drop_constraint_always_carries_the_type_tag() {
    let settings = RenderSettings::default();

    let typed = DropConstraintOp::new("uq_a", "t")
        .constraint_type("unique")
        .schema("s");
    assert_eq!(
        render_one(&settings, typed),
        "op.drop_constraint('uq_a', 't', schema='s', type_='unique')"
    );

    let untyped = DropConstraintOp::new("uq_a", "t");
    assert_eq!(
        render_one(&settings, untyped),
        "op.drop_constraint('uq_a', 't', type_=None)"
    );
}

#[test]
fn batch_drop_constraint_keeps_only_name_and_type() {
    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let op = ModifyTableOps::new("t")
        .op(DropConstraintOp::new("uq_a", "t").constraint_type("unique"));

    let lines = render_lines(&settings, op);
    assert_eq!(lines[1], "batch_op.drop_constraint('uq_a', type_='unique')");
}

#[test]
fn freestanding_primary_key_and_check_are_not_implemented() {
    let settings = RenderSettings::default();
    let dialect = Postgres;
    let mut ctx = RenderContext::new(&settings, &dialect);

    let pk = CreatePrimaryKeyOp::new("t", ["id"]);
    assert!(matches!(
        render_op(&mut ctx, &pk.into()),
        Err(RenderError::NotImplemented(_))
    ));

    let check = CreateCheckConstraintOp::new("t", SqlExpr::raw("price > 0"));
    assert!(matches!(
        render_op(&mut ctx, &check.into()),
        Err(RenderError::NotImplemented(_))
    ));
}

#[test]
fn execute_renders_plain_sql_and_rejects_expressions() {
    let settings = RenderSettings::default();

    assert_eq!(
        render_one(
            &settings,
            ExecuteSqlOp::new("UPDATE accounts SET active = true")
        ),
        "op.execute('UPDATE accounts SET active = true')"
    );

    let dialect = Postgres;
    let mut ctx = RenderContext::new(&settings, &dialect);
    let op = ExecuteSqlOp::new(SqlExpr::raw("UPDATE accounts SET active = ").bind(true, ""));
    assert!(matches!(
        render_op(&mut ctx, &op.into()),
        Err(RenderError::NotImplemented(_))
    ));
}

#[test]
fn render_item_hook_overrides_the_default_type_rendering() {
    let hook: RenderItemHook = Arc::new(|item, _ctx| match item {
        RenderItem::Type(t) if t.name == "Geometry" => Some("geoalchemy2.Geometry()".to_string()),
        _ => None,
    });
    let settings = RenderSettings {
        render_item: Some(hook),
        ..Default::default()
    };

    let op = AddColumnOp::new(
        "t",
        ColumnDef::new("geom", TypeRef::user_defined("app.gis", "Geometry")).nullable(true),
    );
    assert_eq!(
        render_one(&settings, op),
        "op.add_column('t', sa.Column('geom', geoalchemy2.Geometry(), nullable=True))"
    );

    // Unmatched items keep the default rendering.
    let plain = AddColumnOp::new("t", ColumnDef::new("n", TypeRef::core("Integer")));
    assert_eq!(
        render_one(&settings, plain),
        "op.add_column('t', sa.Column('n', sa.Integer()))"
    );
}

#[test]
fn render_item_hook_can_replace_whole_columns() {
    let hook: RenderItemHook = Arc::new(|item, _ctx| match item {
        RenderItem::Column(column) => Some(format!("make_audit_column('{}')", column.name.as_str())),
        _ => None,
    });
    let settings = RenderSettings {
        render_item: Some(hook),
        ..Default::default()
    };

    let op = AddColumnOp::new("t", ColumnDef::new("changed_at", TypeRef::core("DateTime")));
    assert_eq!(
        render_one(&settings, op),
        "op.add_column('t', make_audit_column('changed_at'))"
    );
}

#[derive(Debug)]
struct GrantOp {
    role: String,
}

impl CustomOperation for GrantOp {
    fn kind(&self) -> &str {
        "grant_select"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn custom_operations_render_through_the_registry() {
    let mut settings = RenderSettings::default();
    settings.custom_renderers.register("grant_select", |op, ctx| {
        let grant = op
            .as_any()
            .downcast_ref::<GrantOp>()
            .expect("registered for grant_select");
        Ok(vec![format!(
            "{}execute('GRANT SELECT ON ALL TABLES IN SCHEMA public TO {}')",
            ctx.migration_prefix(),
            grant.role
        )])
    });

    let op = MigrationOp::Custom(Arc::new(GrantOp {
        role: "reporting".to_string(),
    }));
    assert_eq!(
        render_one(&settings, op),
        "op.execute('GRANT SELECT ON ALL TABLES IN SCHEMA public TO reporting')"
    );
}

#[test]
fn unregistered_custom_operations_are_rejected_by_kind() {
    let settings = RenderSettings::default();
    let dialect = Postgres;
    let mut ctx = RenderContext::new(&settings, &dialect);

    let op = MigrationOp::Custom(Arc::new(GrantOp {
        role: "reporting".to_string(),
    }));
    let err = render_op(&mut ctx, &op).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedOperation(_)));
    assert!(err.to_string().contains("grant_select"));
}

#[test]
fn configured_prefixes_reach_every_call_site() {
    let settings = RenderSettings {
        sqlalchemy_module_prefix: "sqla.".to_string(),
        migration_module_prefix: "migration_op.".to_string(),
        ..Default::default()
    };

    let op = AddColumnOp::new("t", ColumnDef::new("c", TypeRef::core("Integer")));
    assert_eq!(
        render_one(&settings, op),
        "migration_op.add_column('t', sqla.Column('c', sqla.Integer()))"
    );
}
