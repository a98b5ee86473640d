//! Mock database handle for testing
//!
//! This handle returns predefined rows without connecting to any database.
//! It's useful for:
//! - Unit testing the adapters' mapping logic
//! - Asserting the exact statements an adapter issues
//! - Simulating error conditions a real database rarely produces
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemabind_catalog::mock::{row, MockHandle};
//! use schemabind_catalog::{DatabaseHandle, SqlValue};
//!
//! let handle = MockHandle::new();
//! handle
//!     .add_raw_rows(
//!         "pragma table_info(users)",
//!         vec![row(&[
//!             ("name", SqlValue::text("id")),
//!             ("type", SqlValue::text("INTEGER")),
//!         ])],
//!     )
//!     .await;
//!
//! let rows = handle.raw("pragma table_info(users)").await?;
//! assert_eq!(handle.raw_statements().await.len(), 1);
//! ```

use crate::adapter::IntrospectError;
use crate::handle::{DatabaseHandle, Row, SqlValue};
use crate::query::SelectQuery;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Build a row from column/value pairs
///
/// Convenience for writing canned pragma and catalog rows in tests.
pub fn row(pairs: &[(&str, SqlValue)]) -> Row {
    Row::new(
        pairs.iter().map(|(name, _)| name.to_string()).collect(),
        pairs.iter().map(|(_, value)| value.clone()).collect(),
    )
}

/// Mock database handle for testing
///
/// Stores canned rows keyed by exact raw-statement text and by relation
/// name for structured queries, and records every call it receives so
/// tests can assert what an adapter actually issued. Statements with no
/// canned rows return an empty result, which is how SQLite itself answers
/// a pragma against a missing table.
///
/// # Example
///
/// ```rust,ignore
/// let handle = MockHandle::new()
///     .with_latency(50)   // 50ms simulated latency
///     .with_failure();    // every call fails
/// ```
pub struct MockHandle {
    /// Canned rows by exact raw statement text
    raw_rows: Arc<RwLock<HashMap<String, Vec<Row>>>>,

    /// Canned rows by relation name for structured queries
    select_rows: Arc<RwLock<HashMap<String, Vec<Row>>>>,

    /// Errors by raw statement text or relation name
    errors: Arc<RwLock<HashMap<String, IntrospectError>>>,

    /// Raw statements received, in call order
    raw_log: Arc<RwLock<Vec<String>>>,

    /// Structured queries received, in call order
    select_log: Arc<RwLock<Vec<SelectQuery>>>,

    /// Fail every call
    fail_all: bool,

    /// Simulated latency (milliseconds)
    latency_ms: u64,
}

impl MockHandle {
    /// Create a mock handle with no canned rows
    pub fn new() -> Self {
        Self {
            raw_rows: Arc::new(RwLock::new(HashMap::new())),
            select_rows: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            raw_log: Arc::new(RwLock::new(Vec::new())),
            select_log: Arc::new(RwLock::new(Vec::new())),
            fail_all: false,
            latency_ms: 0,
        }
    }

    /// Add canned rows for an exact raw statement text
    pub async fn add_raw_rows(&self, statement: &str, rows: Vec<Row>) {
        self.raw_rows.write().await.insert(statement.to_string(), rows);
    }

    /// Add canned rows for structured queries over a relation
    pub async fn add_select_rows(&self, relation: &str, rows: Vec<Row>) {
        self.select_rows
            .write()
            .await
            .insert(relation.to_string(), rows);
    }

    /// Configure an error for a raw statement text or relation name
    pub async fn add_error_for(&self, key: &str, error: IntrospectError) {
        self.errors.write().await.insert(key.to_string(), error);
    }

    /// Configure every call to fail
    pub fn with_failure(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Configure simulated latency for all operations
    ///
    /// # Arguments
    ///
    /// * `latency_ms` - Delay in milliseconds before returning results
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Raw statements received so far, in call order
    pub async fn raw_statements(&self) -> Vec<String> {
        self.raw_log.read().await.clone()
    }

    /// Structured queries received so far, in call order
    pub async fn select_queries(&self) -> Vec<SelectQuery> {
        self.select_log.read().await.clone()
    }

    /// Forget recorded calls, keeping the canned rows
    pub async fn clear_log(&self) {
        self.raw_log.write().await.clear();
        self.select_log.write().await.clear();
    }

    /// Simulate latency if configured
    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockHandle {
    fn clone(&self) -> Self {
        Self {
            raw_rows: Arc::clone(&self.raw_rows),
            select_rows: Arc::clone(&self.select_rows),
            errors: Arc::clone(&self.errors),
            raw_log: Arc::clone(&self.raw_log),
            select_log: Arc::clone(&self.select_log),
            fail_all: self.fail_all,
            latency_ms: self.latency_ms,
        }
    }
}

#[async_trait::async_trait]
impl DatabaseHandle for MockHandle {
    async fn raw(&self, statement: &str) -> Result<Vec<Row>, IntrospectError> {
        self.simulate_latency().await;
        self.raw_log.write().await.push(statement.to_string());

        if self.fail_all {
            return Err(IntrospectError::ConnectionError(
                "Simulated connection failure".to_string(),
            ));
        }

        if let Some(error) = self.errors.read().await.get(statement) {
            return Err(error.clone());
        }

        Ok(self
            .raw_rows
            .read()
            .await
            .get(statement)
            .cloned()
            .unwrap_or_default())
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, IntrospectError> {
        self.simulate_latency().await;
        self.select_log.write().await.push(query.clone());

        if self.fail_all {
            return Err(IntrospectError::ConnectionError(
                "Simulated connection failure".to_string(),
            ));
        }

        if let Some(error) = self.errors.read().await.get(query.relation()) {
            return Err(error.clone());
        }

        Ok(self
            .select_rows
            .read()
            .await
            .get(query.relation())
            .cloned()
            .unwrap_or_default())
    }
}
