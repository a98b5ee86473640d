//! SQLite catalog adapter
//!
//! Reads `sqlite_master` plus the `table_info` and `foreign_key_list`
//! pragmas and maps them onto the shared schema model. SQLite exposes a
//! single relevant schema, so the schema arguments other backends need
//! are accepted and ignored here.

use crate::adapter::{IntrospectError, SchemaAdapter};
use crate::handle::{DatabaseHandle, Row, SqlValue};
use crate::query::SelectQuery;
use crate::tasks;
use schemabind_core::{
    ColumnDefinition, Config, EnumDefinition, ForeignKeyReference, TableDefinition,
};

/// Adapter for SQLite databases
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteAdapter;

impl SqliteAdapter {
    /// Create a new SQLite adapter
    pub fn new() -> Self {
        Self
    }
}

/// One `pragma foreign_key_list` row, reduced to the fields the column
/// mapping reads
#[derive(Debug, Clone, PartialEq)]
struct ForeignKeyRow {
    table: String,
    from: String,
    to: String,
}

impl ForeignKeyRow {
    fn from_row(row: &Row) -> Self {
        Self {
            table: text_field(row, "table"),
            from: text_field(row, "from"),
            to: text_field(row, "to"),
        }
    }
}

fn text_field(row: &Row, column: &str) -> String {
    row.get_named(column)
        .and_then(SqlValue::as_str)
        .unwrap_or("")
        .to_string()
}

fn int_field(row: &Row, column: &str) -> i64 {
    row.get_named(column).and_then(SqlValue::as_i64).unwrap_or(0)
}

/// Reject table names that cannot be interpolated into a pragma safely
///
/// Pragmas take no bound parameters, so the table name has to be spliced
/// into the statement text. Only ASCII alphanumerics and underscores pass.
fn ensure_valid_identifier(table: &str) -> Result<(), IntrospectError> {
    let valid =
        !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(IntrospectError::InvalidIdentifier(table.to_string()))
    }
}

/// Truncate a declared type at its length suffix and lower-case it
///
/// `VARCHAR(255)` becomes `varchar`, `numeric(10,2)` becomes `numeric`.
fn base_type(declared: &str) -> String {
    declared.split('(').next().unwrap_or(declared).to_lowercase()
}

#[async_trait::async_trait]
impl SchemaAdapter for SqliteAdapter {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    /// Enum extraction is table-driven and identical across backends, so
    /// this forwards straight to the shared task.
    async fn get_all_enums(
        &self,
        db: &dyn DatabaseHandle,
        config: &Config,
    ) -> Result<Vec<EnumDefinition>, IntrospectError> {
        tasks::table_enums(db, config).await
    }

    async fn get_all_tables(
        &self,
        db: &dyn DatabaseHandle,
        _schemas: &[String],
    ) -> Result<Vec<TableDefinition>, IntrospectError> {
        let query = SelectQuery::from_relation("sqlite_master")
            .column_as("tbl_name", "name")
            .where_not_eq("tbl_name", "sqlite_sequence")
            .where_in("type", ["table", "view"]);

        let rows = db.select(&query).await?;
        tracing::debug!(count = rows.len(), "listed sqlite catalog entries");

        Ok(rows
            .iter()
            .map(|row| TableDefinition::new(text_field(row, "name"), "main"))
            .collect())
    }

    async fn get_all_columns(
        &self,
        db: &dyn DatabaseHandle,
        _config: &Config,
        table: &str,
        _schema: &str,
    ) -> Result<Vec<ColumnDefinition>, IntrospectError> {
        ensure_valid_identifier(table)?;

        let foreign_keys: Vec<ForeignKeyRow> = db
            .raw(&format!("pragma foreign_key_list('{}')", table))
            .await?
            .iter()
            .map(ForeignKeyRow::from_row)
            .collect();

        let rows = db.raw(&format!("pragma table_info({})", table)).await?;
        tracing::trace!(
            table,
            columns = rows.len(),
            foreign_keys = foreign_keys.len(),
            "read table pragmas"
        );

        Ok(rows
            .iter()
            .map(|row| {
                let name = text_field(row, "name");
                let notnull = int_field(row, "notnull");
                let pk = int_field(row, "pk");
                let has_default = row
                    .get_named("dflt_value")
                    .map(|value| !value.is_null())
                    .unwrap_or(false);

                // First declared constraint naming this column wins
                let foreign_key = foreign_keys
                    .iter()
                    .find(|fk| fk.from == name)
                    .map(|fk| ForeignKeyReference::new(fk.table.clone(), fk.to.clone()));

                ColumnDefinition {
                    name,
                    column_type: base_type(&text_field(row, "type")),
                    nullable: notnull == 0,
                    optional: has_default || notnull == 0 || pk != 0,
                    is_enum: false,
                    is_primary_key: pk != 0,
                    comment: String::new(),
                    foreign_key,
                }
            })
            .collect())
    }
}
