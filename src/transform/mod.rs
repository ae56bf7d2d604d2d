//! Display-transformation metadata, stored separately from the schema.
//!
//! The schema change itself never depends on this store; entries are keyed
//! by `(database, table, column)` and overwrite on re-submission.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::core::{Result, TransformationMeta};

#[async_trait]
pub trait TransformationStore: Send + Sync {
    async fn set_mime(
        &self,
        db: &str,
        table: &str,
        column: &str,
        meta: &TransformationMeta,
    ) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryTransformationStore {
    entries: RwLock<HashMap<(String, String, String), TransformationMeta>>,
}

impl InMemoryTransformationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, db: &str, table: &str, column: &str) -> Option<TransformationMeta> {
        self.entries
            .read()
            .ok()?
            .get(&(db.to_string(), table.to_string(), column.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransformationStore for InMemoryTransformationStore {
    async fn set_mime(
        &self,
        db: &str,
        table: &str,
        column: &str,
        meta: &TransformationMeta,
    ) -> Result<()> {
        let mut entries = self.entries.write()?;
        entries.insert(
            (db.to_string(), table.to_string(), column.to_string()),
            meta.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_mime_overwrites_per_column() {
        let store = InMemoryTransformationStore::new();

        let png = TransformationMeta {
            mime_type: "image/png".to_string(),
            ..Default::default()
        };
        store.set_mime("shop", "parts", "photo", &png).await.unwrap();

        let jpeg = TransformationMeta {
            mime_type: "image/jpeg".to_string(),
            ..Default::default()
        };
        store
            .set_mime("shop", "parts", "photo", &jpeg)
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("shop", "parts", "photo").unwrap().mime_type,
            "image/jpeg"
        );
    }
}
