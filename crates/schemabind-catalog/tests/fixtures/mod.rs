//! Shared fixtures for catalog integration tests
//!
//! Provides a rusqlite-backed `DatabaseHandle` plus a sample database, so
//! the adapter is exercised against a real SQLite engine without any
//! external service.

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use schemabind_catalog::{DatabaseHandle, IntrospectError, Row, SelectQuery, SqlValue};
use schemabind_core::{Config, EnumTable};
use std::sync::Mutex;

/// Sample schema covering the interesting mapping cases: an AUTOINCREMENT
/// key (which creates `sqlite_sequence`), defaults, a composite primary
/// key, two foreign keys, a view, and an enum lookup table.
pub const SAMPLE_SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email VARCHAR(255) NOT NULL,
        display_name TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        balance NUMERIC(10,2)
    );

    CREATE TABLE order_status (
        code TEXT PRIMARY KEY,
        label TEXT NOT NULL
    );

    CREATE TABLE orders (
        order_ref VARCHAR(64) NOT NULL,
        line_no INTEGER NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users (id),
        status_code TEXT REFERENCES order_status (code),
        quantity INTEGER NOT NULL DEFAULT 1,
        PRIMARY KEY (order_ref, line_no)
    );

    CREATE VIEW active_users AS
        SELECT id, email FROM users WHERE status = 'active';

    INSERT INTO order_status (code, label) VALUES
        ('draft', 'Draft'),
        ('open', 'Open'),
        ('shipped', 'Shipped');
";

/// `DatabaseHandle` backed by an in-process rusqlite connection
///
/// The connection sits behind a mutex because rusqlite connections are
/// not `Sync`; introspection statements are short, so contention is not
/// a concern in tests.
pub struct SqliteTestHandle {
    conn: Mutex<Connection>,
}

impl SqliteTestHandle {
    /// Open an empty in-memory database
    pub fn in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory sqlite");
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open an in-memory database seeded with [`SAMPLE_SCHEMA`]
    pub fn with_sample_schema() -> Self {
        let handle = Self::in_memory();
        handle.execute_batch(SAMPLE_SCHEMA);
        handle
    }

    /// Run a batch of setup statements
    pub fn execute_batch(&self, sql: &str) {
        self.conn
            .lock()
            .unwrap()
            .execute_batch(sql)
            .expect("execute schema batch");
    }

    fn run(&self, sql: &str) -> Result<Vec<Row>, IntrospectError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| IntrospectError::QueryError(e.to_string()))?;

        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| IntrospectError::QueryError(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| IntrospectError::QueryError(e.to_string()))?
        {
            let mut values = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                let value = match row
                    .get_ref(index)
                    .map_err(|e| IntrospectError::QueryError(e.to_string()))?
                {
                    ValueRef::Null => SqlValue::Null,
                    ValueRef::Integer(value) => SqlValue::Integer(value),
                    ValueRef::Real(value) => SqlValue::Real(value),
                    ValueRef::Text(text) => {
                        SqlValue::Text(String::from_utf8_lossy(text).into_owned())
                    }
                    ValueRef::Blob(blob) => SqlValue::Blob(blob.to_vec()),
                };
                values.push(value);
            }
            out.push(Row::new(columns.clone(), values));
        }

        Ok(out)
    }
}

#[async_trait::async_trait]
impl DatabaseHandle for SqliteTestHandle {
    async fn raw(&self, statement: &str) -> Result<Vec<Row>, IntrospectError> {
        self.run(statement)
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, IntrospectError> {
        self.run(&query.to_sql())
    }
}

/// Config mapping the `order_status` lookup table to an enum
pub fn order_status_enum_config() -> Config {
    let mut config = Config::default();
    config.table_enums.insert(
        "main.order_status".to_string(),
        EnumTable {
            key: "code".to_string(),
            value: "label".to_string(),
        },
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handle_runs_raw_statements() {
        let handle = SqliteTestHandle::with_sample_schema();
        let rows = handle.raw("SELECT count(*) AS n FROM order_status").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_named("n"), Some(&SqlValue::Integer(3)));
    }

    #[tokio::test]
    async fn handle_surfaces_sqlite_errors() {
        let handle = SqliteTestHandle::in_memory();
        let result = handle.raw("SELECT * FROM missing_table").await;

        assert!(matches!(result, Err(IntrospectError::QueryError(_))));
    }

    #[tokio::test]
    async fn handle_renders_structured_queries() {
        let handle = SqliteTestHandle::with_sample_schema();
        let query = SelectQuery::from_relation("order_status")
            .column_as("code", "key")
            .column_as("label", "value");

        let rows = handle.select(&query).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].columns(), &["key".to_string(), "value".to_string()]);
    }
}
