//! Configuration for a render pass: module prefixes, template slot
//! names, batch mode and the caller extension points.

use std::collections::HashMap;
use std::sync::Arc;

use model::ops::CustomOperation;
use model::schema::column::{ColumnDef, ServerDefault};
use model::schema::constraint::{CheckDef, ForeignKeyDef, PrimaryKeyDef, UniqueDef};
use model::schema::types::TypeRef;

use crate::context::RenderContext;
use crate::error::RenderError;

/// Ceiling on flat positional arguments in a single generated call
/// before rendering falls back to the spread form.
pub const MAX_POSITIONAL_ARGS: usize = 255;

/// Caller-supplied hook that may replace the default rendering of one
/// item. Returning `None` keeps the default.
pub type RenderItemHook =
    Arc<dyn Fn(RenderItem<'_>, &mut RenderContext<'_>) -> Option<String> + Send + Sync>;

/// Renderer for one custom operation kind.
pub type CustomOpRenderer = Arc<
    dyn Fn(&dyn CustomOperation, &mut RenderContext<'_>) -> Result<Vec<String>, RenderError>
        + Send
        + Sync,
>;

/// The item categories an override hook can intercept.
#[derive(Debug, Clone, Copy)]
pub enum RenderItem<'a> {
    Column(&'a ColumnDef),
    Type(&'a TypeRef),
    ServerDefault(&'a ServerDefault),
    PrimaryKey(&'a PrimaryKeyDef),
    ForeignKey(&'a ForeignKeyDef),
    Unique(&'a UniqueDef),
    Check(&'a CheckDef),
}

impl RenderItem<'_> {
    /// Category tag for hooks that dispatch on the item kind.
    pub fn category(&self) -> &'static str {
        match self {
            RenderItem::Column(_) => "column",
            RenderItem::Type(_) => "type",
            RenderItem::ServerDefault(_) => "server_default",
            RenderItem::PrimaryKey(_) => "primary_key",
            RenderItem::ForeignKey(_) => "foreign_key",
            RenderItem::Unique(_) => "unique",
            RenderItem::Check(_) => "check",
        }
    }
}

/// Registry of renderers for operation kinds this crate does not know.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, CustomOpRenderer>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `renderer` for operations tagged `kind`, replacing any
    /// previous registration.
    pub fn register<F>(&mut self, kind: impl Into<String>, renderer: F)
    where
        F: Fn(&dyn CustomOperation, &mut RenderContext<'_>) -> Result<Vec<String>, RenderError>
            + Send
            + Sync
            + 'static,
    {
        self.renderers.insert(kind.into(), Arc::new(renderer));
    }

    pub fn get(&self, kind: &str) -> Option<CustomOpRenderer> {
        self.renderers.get(kind).cloned()
    }
}

/// Settings for one script-generation pass.
#[derive(Clone)]
pub struct RenderSettings {
    /// Template slot receiving the upgrade body.
    pub upgrade_token: String,
    /// Template slot receiving the downgrade body.
    pub downgrade_token: String,
    /// Render modify-table groups as nested batch blocks.
    pub render_as_batch: bool,
    /// Prefix for references into the schema library (`sa.`).
    pub sqlalchemy_module_prefix: String,
    /// Prefix for calls into the migration tool (`op.`).
    pub migration_module_prefix: String,
    /// Prefix for user-defined types; each type's own module is used
    /// when unset.
    pub user_module_prefix: Option<String>,
    /// Positional-argument ceiling before the spread form kicks in.
    pub max_positional_args: usize,
    /// Override hook consulted before every default item rendering.
    pub render_item: Option<RenderItemHook>,
    /// Renderers for custom operation kinds.
    pub custom_renderers: RendererRegistry,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            upgrade_token: "upgrades".to_string(),
            downgrade_token: "downgrades".to_string(),
            render_as_batch: false,
            sqlalchemy_module_prefix: "sa.".to_string(),
            migration_module_prefix: "op.".to_string(),
            user_module_prefix: None,
            max_positional_args: MAX_POSITIONAL_ARGS,
            render_item: None,
            custom_renderers: RendererRegistry::default(),
        }
    }
}
