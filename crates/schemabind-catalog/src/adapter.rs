//! Adapter trait connecting a database handle to the schema model

use crate::handle::DatabaseHandle;
use schemabind_core::{ColumnDefinition, Config, EnumDefinition, TableDefinition};

/// Errors that can occur while reading a database catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum IntrospectError {
    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid table identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),
}

/// Trait for backend adapters that read a database catalog
///
/// Signatures are identical across backends so callers can hold a
/// `Box<dyn SchemaAdapter>` chosen at runtime. A backend that has no use
/// for a parameter (SQLite ignores `schemas`, for instance) still accepts
/// it rather than narrowing the interface.
#[async_trait::async_trait]
pub trait SchemaAdapter: Send + Sync + std::fmt::Debug {
    /// Get the adapter name (e.g., "sqlite")
    fn name(&self) -> &'static str;

    /// Collect enum definitions for the lookup tables named in the config
    async fn get_all_enums(
        &self,
        db: &dyn DatabaseHandle,
        config: &Config,
    ) -> Result<Vec<EnumDefinition>, IntrospectError>;

    /// List the tables and views visible in the catalog
    async fn get_all_tables(
        &self,
        db: &dyn DatabaseHandle,
        schemas: &[String],
    ) -> Result<Vec<TableDefinition>, IntrospectError>;

    /// Read the column definitions of one table
    async fn get_all_columns(
        &self,
        db: &dyn DatabaseHandle,
        config: &Config,
        table: &str,
        schema: &str,
    ) -> Result<Vec<ColumnDefinition>, IntrospectError>;
}

/// Build the adapter for a configured dialect name
///
/// Only SQLite ships in-tree; sibling backends implement the same trait
/// out of tree and plug into the same callers.
pub fn adapter_for_dialect(dialect: &str) -> Result<Box<dyn SchemaAdapter>, IntrospectError> {
    match dialect {
        "sqlite" | "sqlite3" => Ok(Box::new(crate::sqlite::SqliteAdapter::new())),
        other => Err(IntrospectError::UnsupportedDialect(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_sqlite_adapter() {
        let adapter = adapter_for_dialect("sqlite").unwrap();
        assert_eq!(adapter.name(), "sqlite");

        let aliased = adapter_for_dialect("sqlite3").unwrap();
        assert_eq!(aliased.name(), "sqlite");
    }

    #[test]
    fn factory_rejects_unknown_dialects() {
        let err = adapter_for_dialect("oracle").unwrap_err();
        assert!(matches!(err, IntrospectError::UnsupportedDialect(name) if name == "oracle"));
    }
}
