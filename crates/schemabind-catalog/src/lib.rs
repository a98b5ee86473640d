//! Database catalog adapters for schema-model generation
//!
//! This crate connects a caller-supplied database handle to the shared
//! schema model: adapters list tables and views, read per-table column
//! definitions, and extract table-driven enums, and the introspection
//! pass assembles the lot into one `DatabaseDefinition` for downstream
//! generators.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemabind_catalog::{adapter_for_dialect, read_database};
//! use schemabind_core::Config;
//!
//! let config = Config::from_file(std::path::Path::new("schemabind.toml"))?;
//! let adapter = adapter_for_dialect(&config.dialect)?;
//! let definition = read_database(&handle, adapter.as_ref(), &config).await?;
//! ```

pub mod adapter;
pub mod handle;
pub mod introspect;
pub mod mock;
pub mod query;
pub mod sqlite;
pub mod tasks;

pub use adapter::{adapter_for_dialect, IntrospectError, SchemaAdapter};
pub use handle::{DatabaseHandle, Row, SqlValue};
pub use introspect::read_database;
pub use mock::MockHandle;
pub use query::SelectQuery;
pub use sqlite::SqliteAdapter;
