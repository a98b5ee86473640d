//! SchemaBind Core
//!
//! Normalized schema model and configuration shared by every adapter.
//! The serialized field names are consumed by downstream generators -
//! treat them as public API.

pub mod config;
pub mod model;

pub use config::{Config, ConfigError, EnumTable};
pub use model::{
    ColumnDefinition, DatabaseDefinition, EnumDefinition, ForeignKeyReference, TableDefinition,
    TableSchema,
};
