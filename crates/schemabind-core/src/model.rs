//! Database schema model shared by every adapter and consumer
//!
//! These types describe what introspection found, normalized across
//! backends. Field names serialize in the camelCase form downstream
//! code generators consume (`type`, `isPrimaryKey`, `foreignKeyConfig`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A table or view discovered in the database catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    /// Table name as stored in the catalog
    pub name: String,

    /// Schema the table belongs to (always `main` for SQLite)
    pub schema: String,

    /// Table comment, empty when the backend has none
    pub comment: String,
}

impl TableDefinition {
    /// Create a table definition with an empty comment
    pub fn new(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            comment: String::new(),
        }
    }
}

/// Target of a single-column foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyReference {
    /// Referenced table
    pub table: String,

    /// Referenced column in that table
    pub column: String,
}

impl ForeignKeyReference {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// One column of a table, with the derived flags consumers key off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Declared type, lower-cased and truncated at any `(` suffix
    /// (`VARCHAR(255)` becomes `varchar`)
    #[serde(rename = "type")]
    pub column_type: String,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Whether a value may be omitted on insert: the column has a
    /// default, is nullable, or is part of the primary key
    pub optional: bool,

    /// Whether the column's values come from a declared enum
    pub is_enum: bool,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Column comment, empty when the backend has none
    pub comment: String,

    /// First foreign key declared with this column as its source, if any
    #[serde(rename = "foreignKeyConfig", skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyReference>,
}

impl ColumnDefinition {
    /// Create a column with all flags cleared
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: false,
            optional: false,
            is_enum: false,
            is_primary_key: false,
            comment: String::new(),
            foreign_key: None,
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set whether the column may be omitted on insert
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Mark the column as part of the primary key
    pub fn with_primary_key(mut self, is_primary_key: bool) -> Self {
        self.is_primary_key = is_primary_key;
        self
    }

    /// Attach a foreign key reference
    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyReference) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }
}

/// An enum-like lookup table turned into a named value set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDefinition {
    /// Enum name (the source table name)
    pub name: String,

    /// Schema the source table belongs to
    pub schema: String,

    /// Enum keys mapped to their display values, in key order
    pub values: BTreeMap<String, String>,
}

impl EnumDefinition {
    /// Create an enum definition with no values yet
    pub fn new(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            values: BTreeMap::new(),
        }
    }
}

/// A table definition joined with its introspected columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// Table name
    pub name: String,

    /// Schema the table belongs to
    pub schema: String,

    /// Table comment
    pub comment: String,

    /// Ordered list of columns
    pub columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    /// Join a table definition with its columns
    pub fn from_definition(table: TableDefinition, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: table.name,
            schema: table.schema,
            comment: table.comment,
            columns,
        }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Everything one introspection pass found in a database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDefinition {
    /// Tables in catalog order, each with its columns
    pub tables: Vec<TableSchema>,

    /// Enum definitions extracted from configured lookup tables
    pub enums: Vec<EnumDefinition>,
}

impl DatabaseDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Find a table by name
    pub fn find_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get table names in catalog order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

impl Default for DatabaseDefinition {
    fn default() -> Self {
        Self::new()
    }
}
