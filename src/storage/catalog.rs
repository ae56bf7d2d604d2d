use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{Result, SchemaError};

use super::TableSchema;

/// Catalog holds only schema metadata, grouped per database.
/// Immutable after construction: mutation returns a new `Catalog`
/// (Copy-on-Write), so snapshots clone cheaply and never block readers.
#[derive(Clone, Default, Debug)]
pub struct Catalog {
    databases: Arc<HashMap<String, HashMap<String, TableSchema>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table, creating the owning database entry on first use.
    /// Returns a NEW catalog; the old one stays unchanged.
    pub fn with_table(self, db: &str, schema: TableSchema) -> Result<Self> {
        let mut databases = (*self.databases).clone();
        let tables = databases.entry(db.to_string()).or_default();

        if tables.contains_key(schema.name()) {
            return Err(SchemaError::TableExists(schema.name().to_string()));
        }
        tables.insert(schema.name().to_string(), schema);

        Ok(Self {
            databases: Arc::new(databases),
        })
    }

    /// Replaces a table's schema. The table must already exist.
    pub fn with_altered_table(self, db: &str, schema: TableSchema) -> Result<Self> {
        let mut databases = (*self.databases).clone();
        let tables = databases
            .get_mut(db)
            .ok_or_else(|| SchemaError::DatabaseNotFound(db.to_string()))?;

        if !tables.contains_key(schema.name()) {
            return Err(SchemaError::TableNotFound(schema.name().to_string()));
        }
        tables.insert(schema.name().to_string(), schema);

        Ok(Self {
            databases: Arc::new(databases),
        })
    }

    pub fn table(&self, db: &str, table: &str) -> Result<&TableSchema> {
        let tables = self
            .databases
            .get(db)
            .ok_or_else(|| SchemaError::DatabaseNotFound(db.to_string()))?;
        tables
            .get(table)
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnDef;

    #[test]
    fn with_table_is_copy_on_write() {
        let empty = Catalog::new();
        let seeded = empty
            .clone()
            .with_table(
                "shop",
                TableSchema::new("orders", vec![ColumnDef::new("id", "INT")]),
            )
            .unwrap();

        assert!(empty.table("shop", "orders").is_err());
        assert!(seeded.table("shop", "orders").is_ok());
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let catalog = Catalog::new()
            .with_table("shop", TableSchema::new("orders", vec![]))
            .unwrap();
        let err = catalog
            .with_table("shop", TableSchema::new("orders", vec![]))
            .unwrap_err();
        assert!(matches!(err, SchemaError::TableExists(_)));
    }

    #[test]
    fn lookups_distinguish_missing_database_from_missing_table() {
        let catalog = Catalog::new()
            .with_table("shop", TableSchema::new("orders", vec![]))
            .unwrap();

        assert!(matches!(
            catalog.table("nowhere", "orders"),
            Err(SchemaError::DatabaseNotFound(_))
        ));
        assert!(matches!(
            catalog.table("shop", "ghost"),
            Err(SchemaError::TableNotFound(_))
        ));
    }
}
