// ============================================================================
// tablesmith Library
// ============================================================================

pub mod config;
pub mod core;
pub mod executor;
pub mod storage;
pub mod transform;
pub mod web;

// Re-export main types for convenience
pub use config::AppConfig;
pub use core::{ColumnDef, ColumnPlacement, Result, SchemaError, TransformationMeta};
pub use executor::{AlterRequest, CatalogExecutor, StatementExecutor, TableInfoResolver};
pub use storage::{Catalog, TableSchema};
pub use transform::{InMemoryTransformationStore, TransformationStore};
pub use web::{AppState, build_router, translator::AddColumnsTranslator};
