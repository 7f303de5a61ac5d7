//! Walks a small upgrade/downgrade tree through the full script
//! assembler and prints the resulting template slots.

use codegen::assembler::render_migration_script;
use codegen::context::RenderContext;
use codegen::dialect::Postgres;
use codegen::settings::RenderSettings;
use model::core::ident::NameRef;
use model::ops::{
    AddColumnOp, CreateIndexOp, CreateTableOp, DropColumnOp, DropIndexOp, DropTableOp,
    MigrationScript, ModifyTableOps, OpContainer,
};
use model::schema::column::ColumnDef;
use model::schema::constraint::{PrimaryKeyDef, TableConstraint, UniqueDef};
use model::schema::types::TypeRef;
use tracing::Level;

fn main() {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let upgrade = OpContainer::new()
        .op(CreateTableOp::new("accounts")
            .column(ColumnDef::new("id", TypeRef::core("Integer")).nullable(false))
            .column(ColumnDef::new("email", TypeRef::core("String").arg(120)).nullable(false))
            .column(
                ColumnDef::new("settings", TypeRef::dialect("postgresql", "JSONB")).nullable(true),
            )
            .constraint(TableConstraint::PrimaryKey(PrimaryKeyDef::new(["id"])))
            .constraint(TableConstraint::Unique(
                UniqueDef::new(["email"]).name(NameRef::generated("uq_accounts_email")),
            )))
        .op(ModifyTableOps::new("orders")
            .op(AddColumnOp::new(
                "orders",
                ColumnDef::new("account_id", TypeRef::core("Integer")).nullable(true),
            ))
            .op(CreateIndexOp::new(NameRef::generated("ix_orders_account_id"), "orders")
                .element("account_id")));

    let downgrade = OpContainer::new()
        .op(ModifyTableOps::new("orders")
            .op(DropIndexOp::new(NameRef::generated("ix_orders_account_id"), "orders"))
            .op(DropColumnOp::new("orders", "account_id")))
        .op(DropTableOp::new("accounts"));

    let script = MigrationScript::new(upgrade, downgrade);

    let settings = RenderSettings {
        render_as_batch: true,
        ..Default::default()
    };
    let dialect = Postgres;
    let mut ctx = RenderContext::new(&settings, &dialect);

    match render_migration_script(&mut ctx, &script) {
        Ok(slots) => {
            for (token, body) in &slots {
                println!("--- {token} ---");
                println!("{body}");
                println!();
            }
        }
        Err(e) => eprintln!("failed to render script: {e}"),
    }
}
