//! Data model for schema-migration operation trees.
//!
//! The types here describe *what changed*: tables, columns, indexes and
//! constraints, plus the container operations that group changes per
//! table. The `codegen` crate consumes this model read-only and emits
//! the text of an editable migration script from it.

pub mod core;
pub mod ops;
pub mod schema;
