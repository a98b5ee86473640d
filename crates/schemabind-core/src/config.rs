//! Configuration schema (schemabind.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Columns of a lookup table read as an enum definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumTable {
    /// Column holding the enum key
    pub key: String,

    /// Column holding the display value
    pub value: String,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend dialect the adapter factory selects on (sqlite, postgres, ...)
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Schemas to introspect; single-schema backends ignore this
    #[serde(default)]
    pub schemas: Vec<String>,

    /// When non-empty, only these tables are kept. Entries match the bare
    /// table name or the qualified `schema.table` form.
    #[serde(default)]
    pub tables: Vec<String>,

    /// Tables always dropped from the result; same matching rules as `tables`
    #[serde(default)]
    pub excluded_tables: Vec<String>,

    /// Lookup tables to read as enums, keyed by qualified `schema.table` name
    #[serde(default)]
    pub table_enums: BTreeMap<String, EnumTable>,
}

fn default_dialect() -> String {
    "sqlite".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            schemas: Vec::new(),
            tables: Vec::new(),
            excluded_tables: Vec::new(),
            table_enums: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Check if a name matches any filter entry, bare or schema-qualified
    fn matches_entry(entries: &[String], schema: &str, table: &str) -> bool {
        entries.iter().any(|entry| match entry.split_once('.') {
            Some((s, t)) => s == schema && t == table,
            None => entry == table,
        })
    }

    /// Check whether a table survives the include/exclude filters
    ///
    /// Exclusion wins over inclusion; an empty `tables` list keeps everything
    /// not excluded.
    pub fn is_table_included(&self, schema: &str, table: &str) -> bool {
        if Self::matches_entry(&self.excluded_tables, schema, table) {
            return false;
        }

        self.tables.is_empty() || Self::matches_entry(&self.tables, schema, table)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
