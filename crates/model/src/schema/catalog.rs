use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The tables already known to the schema collection a render pass
/// works against. Foreign-key rendering uses it to swap a referenced
/// column's lookup key for its canonical name; tables absent from the
/// catalog are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCatalog {
    pub default_schema: Option<String>,
    tables: BTreeMap<String, TableEntry>,
}

/// Column keys of one known table mapped to their canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    columns: BTreeMap<String, String>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_schema(schema: impl Into<String>) -> Self {
        Self {
            default_schema: Some(schema.into()),
            tables: BTreeMap::new(),
        }
    }

    /// Registers a table under its full name (`schema.table` when it
    /// lives outside the default schema) and returns its entry for
    /// column registration.
    pub fn add_table(&mut self, fullname: impl Into<String>) -> &mut TableEntry {
        self.tables.entry(fullname.into()).or_default()
    }

    pub fn table(&self, fullname: &str) -> Option<&TableEntry> {
        self.tables.get(fullname)
    }

    pub fn contains(&self, fullname: &str) -> bool {
        self.tables.contains_key(fullname)
    }
}

impl TableEntry {
    pub fn add_column(&mut self, key: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.columns.insert(key.into(), name.into());
        self
    }

    pub fn column_name(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_resolve_by_key() {
        let mut catalog = TableCatalog::with_default_schema("public");
        catalog
            .add_table("public.users")
            .add_column("UserID", "user_id")
            .add_column("email", "email");

        let table = catalog.table("public.users").unwrap();
        assert_eq!(table.column_name("UserID"), Some("user_id"));
        assert_eq!(table.column_name("missing"), None);
        assert!(!catalog.contains("public.orders"));
    }
}
