use async_trait::async_trait;

use crate::core::{ColumnDef, ColumnPlacement, Result};
use crate::storage::TableSchema;

pub mod alter;

pub use alter::CatalogExecutor;

/// Everything the statement builder needs for one schema alteration:
/// the new column definitions plus where the group lands.
#[derive(Debug, Clone)]
pub struct AlterRequest {
    pub columns: Vec<ColumnDef>,
    pub placement: ColumnPlacement,
}

/// Synthesizes and runs schema-change statements. Authoritative for SQL
/// dialect correctness; callers never assemble SQL text themselves.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Builds a single `ALTER TABLE` statement from `request`, executes it
    /// against `(db, table)` and returns the executed statement text.
    async fn alter(&self, db: &str, table: &str, request: &AlterRequest) -> Result<String>;

    /// Runs bootstrap DDL (`CREATE TABLE …`) against `db`.
    async fn execute_ddl(&self, db: &str, ddl: &str) -> Result<()>;
}

/// Read-only schema lookup used before re-rendering the form.
#[async_trait]
pub trait TableInfoResolver: Send + Sync {
    async fn table_info(&self, db: &str, table: &str) -> Result<TableSchema>;
}
