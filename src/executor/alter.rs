use std::sync::RwLock;

use async_trait::async_trait;
use sqlparser::ast as sql_ast;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::core::{ColumnDef, ColumnPlacement, Result, SchemaError};
use crate::storage::{Catalog, TableSchema};

use super::{AlterRequest, StatementExecutor, TableInfoResolver};

/// Statement executor backed by the in-memory schema catalog.
///
/// Synthesized statements are round-tripped through `sqlparser` before they
/// are applied, so a statement this executor reports as executed is always
/// one the dialect actually accepts.
pub struct CatalogExecutor {
    catalog: RwLock<Catalog>,
}

impl CatalogExecutor {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::new())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    fn build_statement(table: &str, request: &AlterRequest) -> Result<String> {
        let columns = named_columns(&request.columns);
        if columns.is_empty() {
            return Err(SchemaError::ParseError(
                "statement needs at least one named column".to_string(),
            ));
        }

        let mut clauses = Vec::with_capacity(columns.len());
        for (column, placement) in chain_placements(&columns, &request.placement) {
            clauses.push(add_column_clause(column, &placement)?);
        }

        Ok(format!(
            "ALTER TABLE {} {}",
            quote_identifier(table),
            clauses.join(", ")
        ))
    }

    fn validate_statement(statement: &str) -> Result<()> {
        let parsed = Parser::parse_sql(&MySqlDialect {}, statement)
            .map_err(|e| SchemaError::ParseError(e.to_string()))?;
        if parsed.len() != 1 {
            return Err(SchemaError::ParseError(format!(
                "expected a single statement, got {}",
                parsed.len()
            )));
        }
        Ok(())
    }

    fn apply(&self, db: &str, table: &str, request: &AlterRequest) -> Result<()> {
        let mut guard = self.catalog.write()?;

        let mut schema = guard.table(db, table)?.clone();
        let columns = named_columns(&request.columns);
        for (column, placement) in chain_placements(&columns, &request.placement) {
            schema.insert_column(column.clone(), &placement)?;
        }

        *guard = guard.clone().with_altered_table(db, schema)?;
        Ok(())
    }
}

impl Default for CatalogExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementExecutor for CatalogExecutor {
    async fn alter(&self, db: &str, table: &str, request: &AlterRequest) -> Result<String> {
        let statement = Self::build_statement(table, request)?;
        Self::validate_statement(&statement)?;
        self.apply(db, table, request)?;
        tracing::info!(db, table, %statement, "schema altered");
        Ok(statement)
    }

    async fn execute_ddl(&self, db: &str, ddl: &str) -> Result<()> {
        let statements = Parser::parse_sql(&MySqlDialect {}, ddl)
            .map_err(|e| SchemaError::ParseError(e.to_string()))?;

        let mut guard = self.catalog.write()?;
        let mut catalog = guard.clone();
        for statement in statements {
            let create = match statement {
                sql_ast::Statement::CreateTable(create) => create,
                other => {
                    return Err(SchemaError::ExecutionError(format!(
                        "only CREATE TABLE is supported here, got: {other}"
                    )));
                }
            };
            catalog = catalog.with_table(db, convert_create_table(create)?)?;
        }
        *guard = catalog;
        Ok(())
    }
}

#[async_trait]
impl TableInfoResolver for CatalogExecutor {
    async fn table_info(&self, db: &str, table: &str) -> Result<TableSchema> {
        Ok(self.catalog.read()?.table(db, table)?.clone())
    }
}

/// Field groups the user left blank are not part of the statement.
fn named_columns(columns: &[ColumnDef]) -> Vec<&ColumnDef> {
    columns
        .iter()
        .filter(|col| !col.name.trim().is_empty())
        .collect()
}

/// The group placement applies to the first column; every following column
/// anchors after its predecessor so the group keeps its order.
fn chain_placements<'a>(
    columns: &[&'a ColumnDef],
    placement: &ColumnPlacement,
) -> Vec<(&'a ColumnDef, ColumnPlacement)> {
    let mut out = Vec::with_capacity(columns.len());
    let mut current = placement.clone();
    for column in columns {
        out.push((*column, current.clone()));
        current = match current {
            ColumnPlacement::Last => ColumnPlacement::Last,
            _ => ColumnPlacement::After(column.name.clone()),
        };
    }
    out
}

fn add_column_clause(column: &ColumnDef, placement: &ColumnPlacement) -> Result<String> {
    let sql_type = column.sql_type.trim();
    if sql_type.is_empty() {
        return Err(SchemaError::ParseError(format!(
            "column '{}' has no SQL type",
            column.name
        )));
    }

    let mut clause = format!(
        "ADD COLUMN {} {}",
        quote_identifier(column.name.trim()),
        sql_type
    );
    if !column.nullable {
        clause.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        clause.push_str(" DEFAULT ");
        clause.push_str(&default_literal(default));
    }
    match placement {
        ColumnPlacement::Last => {}
        ColumnPlacement::First => clause.push_str(" FIRST"),
        ColumnPlacement::After(anchor) => {
            clause.push_str(" AFTER ");
            clause.push_str(&quote_identifier(anchor));
        }
    }
    Ok(clause)
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Numbers and a few bare keywords pass through; everything else becomes a
/// quoted string literal.
fn default_literal(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.parse::<i64>().is_ok() || trimmed.parse::<f64>().is_ok() {
        return trimmed.to_string();
    }
    match trimmed.to_ascii_uppercase().as_str() {
        "NULL" | "TRUE" | "FALSE" | "CURRENT_TIMESTAMP" => trimmed.to_ascii_uppercase(),
        _ => format!("'{}'", sql_escape_string(trimmed)),
    }
}

/// Escapes a string for inclusion in a SQL literal.
fn sql_escape_string(value: &str) -> String {
    value.replace('\'', "''")
}

fn convert_create_table(create: sql_ast::CreateTable) -> Result<TableSchema> {
    let table_name = create
        .name
        .0
        .last()
        .map(|part| part.to_string())
        .ok_or_else(|| SchemaError::ParseError("Invalid table name".into()))?;

    let columns = create
        .columns
        .into_iter()
        .map(convert_column_def)
        .collect::<Vec<_>>();

    Ok(TableSchema::new(table_name, columns))
}

fn convert_column_def(col: sql_ast::ColumnDef) -> ColumnDef {
    let nullable = !col
        .options
        .iter()
        .any(|opt| matches!(opt.option, sql_ast::ColumnOption::NotNull));
    let default = col.options.iter().find_map(|opt| match &opt.option {
        sql_ast::ColumnOption::Default(expr) => Some(expr.to_string()),
        _ => None,
    });

    ColumnDef {
        name: col.name.value,
        sql_type: col.data_type.to_string(),
        nullable,
        default,
    }
}
