//! Whole-database introspection pass

use crate::adapter::{IntrospectError, SchemaAdapter};
use crate::handle::DatabaseHandle;
use schemabind_core::{Config, DatabaseDefinition, TableSchema};

/// Read everything the adapter can see into one [`DatabaseDefinition`]
///
/// Lists tables, applies the config's include/exclude filters, reads the
/// columns of each surviving table, then extracts the configured enums.
/// Round-trips run sequentially and the first failure aborts the pass
/// with that error. Table order follows the catalog.
pub async fn read_database(
    db: &dyn DatabaseHandle,
    adapter: &dyn SchemaAdapter,
    config: &Config,
) -> Result<DatabaseDefinition, IntrospectError> {
    let tables = adapter.get_all_tables(db, &config.schemas).await?;
    tracing::debug!(
        adapter = adapter.name(),
        count = tables.len(),
        "listed tables"
    );

    let mut definition = DatabaseDefinition::new();
    for table in tables {
        if !config.is_table_included(&table.schema, &table.name) {
            tracing::trace!(table = table.name.as_str(), "filtered out by config");
            continue;
        }

        let columns = adapter
            .get_all_columns(db, config, &table.name, &table.schema)
            .await?;
        definition
            .tables
            .push(TableSchema::from_definition(table, columns));
    }

    definition.enums = adapter.get_all_enums(db, config).await?;
    tracing::debug!(
        tables = definition.tables.len(),
        enums = definition.enums.len(),
        "database introspection complete"
    );

    Ok(definition)
}
