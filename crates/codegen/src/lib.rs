//! Rendering of schema-migration operation trees into script text.
//!
//! Given an operation tree built from the `model` crate, this crate
//! emits the body of an editable migration script: one call per
//! operation, an import block, and batch-mode `with` blocks where
//! configured. Output is deterministic so a regenerated script diffs
//! cleanly against the previous run.

pub mod assembler;
pub mod context;
pub mod dialect;
pub mod error;
pub mod literal;
pub mod render;
pub mod settings;
pub mod types;

pub use assembler::{indent_block, render_cmd_body, render_migration_script};
pub use context::RenderContext;
pub use dialect::{Dialect, Generic, MySql, Postgres, Sqlite};
pub use error::RenderError;
pub use render::{Render, render_op, render_op_text};
pub use settings::{
    MAX_POSITIONAL_ARGS, RenderItem, RenderItemHook, RenderSettings, RendererRegistry,
};
