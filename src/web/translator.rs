//! Turns a save-submission into one executed schema-change statement plus
//! the per-column metadata fan-out.

use std::sync::Arc;

use crate::executor::{AlterRequest, StatementExecutor};
use crate::transform::TransformationStore;

use super::form::{ColumnField, SaveSubmission};

/// Result of one persistence submission. Produced once, consumed
/// immediately to build the response; never stored.
#[derive(Debug)]
pub enum AlterationOutcome {
    Applied { statement: String, message: String },
    Rejected { diagnostic: String, error_context: String },
}

#[derive(Clone)]
pub struct AddColumnsTranslator {
    executor: Arc<dyn StatementExecutor>,
    transformations: Arc<dyn TransformationStore>,
    browse_mime: bool,
}

impl AddColumnsTranslator {
    pub fn new(
        executor: Arc<dyn StatementExecutor>,
        transformations: Arc<dyn TransformationStore>,
        browse_mime: bool,
    ) -> Self {
        Self {
            executor,
            transformations,
            browse_mime,
        }
    }

    /// Delegates statement synthesis and execution to the executor; on
    /// success fans out the transformation metadata before reporting back.
    /// A rejected statement is terminal: no metadata is touched, no retry.
    pub async fn apply(&self, db: &str, table: &str, save: SaveSubmission) -> AlterationOutcome {
        let request = AlterRequest {
            columns: save.columns.iter().map(ColumnField::to_column_def).collect(),
            placement: save.placement,
        };

        match self.executor.alter(db, table, &request).await {
            Ok(statement) => {
                self.sync_transformations(db, table, &save.columns).await;
                AlterationOutcome::Applied {
                    statement,
                    message: success_message(table),
                }
            }
            Err(err) => {
                tracing::warn!(db, table, error = %err, "schema alteration rejected");
                AlterationOutcome::Rejected {
                    diagnostic: err.to_string(),
                    error_context: error_context(db, table),
                }
            }
        }
    }

    /// Best-effort per entry: a failing entry is logged and skipped, it
    /// never aborts siblings. Entries without a column name are ignored.
    async fn sync_transformations(&self, db: &str, table: &str, columns: &[ColumnField]) {
        if !self.browse_mime {
            return;
        }

        for column in columns {
            let Some(meta) = &column.mime else { continue };
            let name = column.name.trim();
            if name.is_empty() {
                continue;
            }
            if let Err(err) = self.transformations.set_mime(db, table, name, meta).await {
                tracing::warn!(
                    db,
                    table,
                    column = name,
                    error = %err,
                    "transformation metadata update skipped"
                );
            }
        }
    }
}

fn success_message(table: &str) -> String {
    format!("Table {table} has been altered successfully.")
}

/// Route a failed submission points the user at, mirroring the form's
/// error-redirect target.
fn error_context(db: &str, table: &str) -> String {
    format!("/table/sql?db={db}&table={table}")
}
