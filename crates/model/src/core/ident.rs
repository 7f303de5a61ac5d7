use serde::{Deserialize, Serialize};

/// An identifier as it appeared in the source schema, with an optional
/// marker recording that it was explicitly quoted there. The marker is
/// carried as metadata only and never changes the rendered text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub value: String,
    pub quote: Option<bool>,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: None,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: Some(true),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl From<String> for Ident {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A reference to a schema object name. `Generated` marks a name that
/// was synthesized by a naming convention and must be re-resolved
/// through a convention-aware constructor call when the script runs,
/// never emitted as a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameRef {
    Plain(Ident),
    Generated(Ident),
}

impl NameRef {
    pub fn plain(name: impl Into<String>) -> Self {
        NameRef::Plain(Ident::new(name))
    }

    pub fn generated(name: impl Into<String>) -> Self {
        NameRef::Generated(Ident::new(name))
    }

    pub fn ident(&self) -> &Ident {
        match self {
            NameRef::Plain(ident) | NameRef::Generated(ident) => ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.ident().as_str()
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, NameRef::Generated(_))
    }
}

impl From<String> for NameRef {
    fn from(s: String) -> Self {
        NameRef::plain(s)
    }
}

impl From<&str> for NameRef {
    fn from(s: &str) -> Self {
        NameRef::plain(s)
    }
}
