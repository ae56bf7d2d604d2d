use serde::{Deserialize, Serialize};

use crate::core::{ColumnDef, ColumnPlacement, Result, SchemaError};

/// Ordered column list of one table. Column order matters: the add-columns
/// form lets the user anchor new columns before or after existing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn find_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find_column_index(name).is_some()
    }

    /// Inserts one column at the requested position. The anchor of an
    /// `After` placement must already exist.
    pub fn insert_column(&mut self, column: ColumnDef, placement: &ColumnPlacement) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(SchemaError::ColumnExists(
                column.name.clone(),
                self.name.clone(),
            ));
        }

        let index = match placement {
            ColumnPlacement::Last => self.columns.len(),
            ColumnPlacement::First => 0,
            ColumnPlacement::After(anchor) => {
                let anchor_index = self.find_column_index(anchor).ok_or_else(|| {
                    SchemaError::ColumnNotFound(anchor.clone(), self.name.clone())
                })?;
                anchor_index + 1
            }
        };

        self.columns.insert(index, column);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::new(
            "parts",
            vec![
                ColumnDef::new("id", "INT").not_null(),
                ColumnDef::new("label", "VARCHAR(64)"),
            ],
        )
    }

    #[test]
    fn insert_column_honors_placement() {
        let mut s = schema();
        s.insert_column(ColumnDef::new("weight", "FLOAT"), &ColumnPlacement::First)
            .unwrap();
        s.insert_column(
            ColumnDef::new("sku", "VARCHAR(32)"),
            &ColumnPlacement::After("id".to_string()),
        )
        .unwrap();
        s.insert_column(ColumnDef::new("note", "TEXT"), &ColumnPlacement::Last)
            .unwrap();

        let names: Vec<_> = s.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["weight", "id", "sku", "label", "note"]);
    }

    #[test]
    fn insert_column_rejects_duplicates_and_bad_anchor() {
        let mut s = schema();
        let dup = s.insert_column(ColumnDef::new("id", "INT"), &ColumnPlacement::Last);
        assert!(matches!(dup, Err(SchemaError::ColumnExists(..))));

        let bad = s.insert_column(
            ColumnDef::new("x", "INT"),
            &ColumnPlacement::After("ghost".to_string()),
        );
        assert!(matches!(bad, Err(SchemaError::ColumnNotFound(..))));
    }
}
