//! Mutable state threaded through one render pass.

use std::collections::BTreeSet;

use crate::dialect::Dialect;
use crate::error::RenderError;
use crate::settings::{RenderItem, RenderSettings};

/// State shared by every rendering call of one pass: configuration,
/// dialect metadata, the accumulated import set and the batch prefix.
///
/// The batch prefix is present exactly while the children of a
/// batch-mode modify-table group are being rendered. It is only ever
/// installed through `with_batch_prefix`, which restores the previous
/// value on every exit path.
pub struct RenderContext<'a> {
    pub settings: &'a RenderSettings,
    pub dialect: &'a dyn Dialect,
    pub imports: BTreeSet<String>,
    batch_prefix: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a RenderSettings, dialect: &'a dyn Dialect) -> Self {
        Self {
            settings,
            dialect,
            imports: BTreeSet::new(),
            batch_prefix: None,
        }
    }

    pub fn in_batch(&self) -> bool {
        self.batch_prefix.is_some()
    }

    /// Prefix for calls into the migration tool: the batch prefix while
    /// inside a batch scope, the configured module prefix otherwise.
    pub fn migration_prefix(&self) -> &str {
        match &self.batch_prefix {
            Some(prefix) => prefix,
            None => &self.settings.migration_module_prefix,
        }
    }

    /// Prefix for references into the schema library.
    pub fn sqlalchemy_prefix(&self) -> &str {
        &self.settings.sqlalchemy_module_prefix
    }

    /// Records an import statement the emitted script needs.
    pub fn add_import(&mut self, import: impl Into<String>) {
        self.imports.insert(import.into());
    }

    /// Import statements accumulated so far, sorted and deduplicated.
    pub fn sorted_imports(&self) -> Vec<String> {
        self.imports.iter().cloned().collect()
    }

    /// Gives the caller-supplied hook the first chance to render an
    /// item. `None` means no override applies and the default stands.
    pub fn user_override(&mut self, item: RenderItem<'_>) -> Option<String> {
        let hook = self.settings.render_item.clone()?;
        hook(item, self)
    }

    /// Runs `f` with `prefix` installed as the batch prefix, restoring
    /// the previous value afterwards even when `f` fails.
    pub fn with_batch_prefix<T>(
        &mut self,
        prefix: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        let previous = self.batch_prefix.replace(prefix.into());
        let result = f(self);
        self.batch_prefix = previous;
        result
    }
}
