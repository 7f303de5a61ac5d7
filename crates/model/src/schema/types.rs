use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// The module namespace a type constructor belongs to, resolved when
/// the reference is built rather than guessed at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeNamespace {
    /// Core types shipped with the target library.
    Core,
    /// Types from an engine-specific dialect module, keyed by the
    /// module's short name (`postgresql`, `mysql`, ...).
    Dialect(String),
    /// Application-defined types declared in the given module.
    UserDefined { module: String },
}

/// A column type as a constructor call: name, namespace and the
/// arguments needed to rebuild it. Keyword arguments render sorted by
/// key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub namespace: TypeNamespace,
    pub args: Vec<Value>,
    pub kwargs: BTreeMap<String, Value>,
}

impl TypeRef {
    pub fn core(name: impl Into<String>) -> Self {
        Self::new(name, TypeNamespace::Core)
    }

    pub fn dialect(dialect: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name, TypeNamespace::Dialect(dialect.into()))
    }

    pub fn user_defined(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeNamespace::UserDefined {
                module: module.into(),
            },
        )
    }

    fn new(name: impl Into<String>, namespace: TypeNamespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}
