//! Structured catalog queries rendered to SQL by handle implementations

/// A selected column, optionally aliased
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectColumn {
    name: String,
    alias: Option<String>,
}

/// A small structured SELECT over one relation
///
/// Covers exactly what catalog listings and enum-table reads need:
/// aliased projections, an exclude-by-equality filter, and a
/// set-membership filter. Handle implementations either interpret the
/// parts directly or render them with [`SelectQuery::to_sql`].
///
/// # Example
///
/// ```rust,ignore
/// let query = SelectQuery::from_relation("sqlite_master")
///     .column_as("tbl_name", "name")
///     .where_not_eq("tbl_name", "sqlite_sequence")
///     .where_in("type", ["table", "view"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    relation: String,
    schema: Option<String>,
    columns: Vec<SelectColumn>,
    not_eq: Vec<(String, String)>,
    within: Vec<(String, Vec<String>)>,
}

impl SelectQuery {
    /// Start a query over the given relation
    pub fn from_relation(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            schema: None,
            columns: Vec::new(),
            not_eq: Vec::new(),
            within: Vec::new(),
        }
    }

    /// Qualify the relation with a schema name
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Select a column
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(SelectColumn {
            name: name.into(),
            alias: None,
        });
        self
    }

    /// Select a column under an alias
    pub fn column_as(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn {
            name: name.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Keep rows where `column` differs from `value`
    pub fn where_not_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.not_eq.push((column.into(), value.into()));
        self
    }

    /// Keep rows where `column` is one of `values`
    pub fn where_in(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.within
            .push((column.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// The queried relation name
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// The schema qualifier, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Render the query as a SQL string
    ///
    /// Identifiers are double-quoted and literals single-quoted, so names
    /// and values never merge into the statement unescaped.
    pub fn to_sql(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| match &c.alias {
                    Some(alias) => format!("{} AS {}", quote_ident(&c.name), quote_ident(alias)),
                    None => quote_ident(&c.name),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        let relation = match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.relation)),
            None => quote_ident(&self.relation),
        };

        let mut clauses = Vec::new();
        for (column, value) in &self.not_eq {
            clauses.push(format!(
                "{} != {}",
                quote_ident(column),
                quote_literal(value)
            ));
        }
        for (column, values) in &self.within {
            let set = values
                .iter()
                .map(|v| quote_literal(v))
                .collect::<Vec<_>>()
                .join(", ");
            clauses.push(format!("{} IN ({})", quote_ident(column), set));
        }

        let mut sql = format!("SELECT {} FROM {}", columns, relation);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql
    }
}

/// Double-quote an identifier, doubling embedded quotes
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal, doubling embedded quotes
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
