//! Loosely typed records and the database handle adapters run against

use crate::adapter::IntrospectError;
use crate::query::SelectQuery;
use std::fmt;

/// A single value in one of SQLite's storage classes
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit float
    Real(f64),

    /// UTF-8 text
    Text(String),

    /// Raw bytes
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Shorthand for building a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether this is SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The integer payload, if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The text payload, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Real(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
            Self::Blob(bytes) => write!(f, "<{} byte blob>", bytes.len()),
        }
    }
}

/// One result row, column names kept alongside the values
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    /// Create a row from parallel column and value lists
    pub fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Get a value by position
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Get a value by column name (first match wins)
    pub fn get_named(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|index| self.values.get(index))
    }

    /// Column names in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Connection facade the adapters introspect through
///
/// Implementations wrap whatever driver the caller already uses; adapters
/// only ever read catalog data through these two calls. Failures are
/// returned as-is - no retry or timeout happens at this layer.
#[async_trait::async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Execute a raw statement and collect every result row
    async fn raw(&self, statement: &str) -> Result<Vec<Row>, IntrospectError>;

    /// Execute a structured catalog query
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, IntrospectError>;
}
