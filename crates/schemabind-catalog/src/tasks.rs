//! Shared catalog tasks used by every adapter
//!
//! Enum extraction works the same against any backend: read the
//! configured lookup tables and fold their rows into named value sets.
//! Adapters forward to these routines instead of reimplementing them.

use crate::adapter::IntrospectError;
use crate::handle::DatabaseHandle;
use crate::query::SelectQuery;
use schemabind_core::{Config, EnumDefinition};
use std::collections::BTreeMap;

/// Read every configured enum table into an [`EnumDefinition`]
///
/// Config keys are qualified `schema.table` names; a key without a `.`
/// separator is treated as a bare table name. Tables are read in key
/// order, so output is deterministic for a given config. Rows with a
/// NULL key are skipped and a NULL value becomes an empty string; scalar
/// keys and values are coerced to their text form.
pub async fn table_enums(
    db: &dyn DatabaseHandle,
    config: &Config,
) -> Result<Vec<EnumDefinition>, IntrospectError> {
    let mut enums = Vec::with_capacity(config.table_enums.len());

    for (qualified, mapping) in &config.table_enums {
        let (schema, table) = match qualified.split_once('.') {
            Some((schema, table)) => (schema, table),
            None => ("", qualified.as_str()),
        };

        let mut query = SelectQuery::from_relation(table)
            .column_as(&mapping.key, "key")
            .column_as(&mapping.value, "value");
        if !schema.is_empty() {
            query = query.with_schema(schema);
        }

        let rows = db.select(&query).await?;
        tracing::debug!(table = qualified.as_str(), rows = rows.len(), "read enum table");

        let mut values = BTreeMap::new();
        for row in &rows {
            let key = match row.get_named("key") {
                Some(value) if !value.is_null() => value.to_string(),
                _ => continue,
            };
            let value = match row.get_named("value") {
                Some(value) if !value.is_null() => value.to_string(),
                _ => String::new(),
            };
            values.insert(key, value);
        }

        enums.push(EnumDefinition {
            name: table.to_string(),
            schema: schema.to_string(),
            values,
        });
    }

    Ok(enums)
}
