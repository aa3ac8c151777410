// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock connection implementation for testing
//!
//! Provides a scripted in-memory connection with builder pattern for easy
//! test setup. Row queries are matched by a fragment of their text (plus,
//! optionally, their exact parameters); describes are matched by exact query
//! text. The most recently added script wins, so tests can override a
//! fixture. Every issued query is recorded.

use sqlforge_catalog::{CatalogError, CatalogResult, Connection, RawColumn, Row};

/// Fragments identifying each MySQL driver introspection query
pub mod mysql_queries {
    pub const CURRENT_DATABASE: &str = "SELECT DATABASE()";
    pub const TABLE_NAMES: &str = "INFORMATION_SCHEMA.TABLES";
    pub const AUTO_INC: &str = "INFORMATION_SCHEMA.COLUMNS";
    pub const INDEX_NAMES: &str = "AS INDEX_NAME";
    pub const INDEX: &str = "CAST(NON_UNIQUE AS CHAR)";
    pub const FK_NAMES: &str = "INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS";
    pub const FK: &str = "INFORMATION_SCHEMA.KEY_COLUMN_USAGE";
}

/// Build a row of non-NULL text values
pub fn row(values: &[&str]) -> Row {
    values.iter().map(|v| Some(*v)).collect()
}

#[derive(Debug, Clone)]
struct RowScript {
    fragment: String,
    params: Option<Vec<String>>,
    result: CatalogResult<Vec<Row>>,
}

impl RowScript {
    fn matches(&self, query: &str, params: &[&str]) -> bool {
        query.contains(&self.fragment)
            && self
                .params
                .as_ref()
                .is_none_or(|expected| expected.iter().map(String::as_str).eq(params.iter().copied()))
    }
}

#[derive(Debug, Clone)]
struct DescribeScript {
    query: String,
    result: CatalogResult<Vec<RawColumn>>,
}

/// In-memory scripted connection for testing
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    rows: Vec<RowScript>,
    describes: Vec<DescribeScript>,
    issued: Vec<String>,
}

impl MockConnection {
    /// Create a new connection with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any query containing `fragment` with `rows`
    pub fn on_query(mut self, fragment: &str, rows: Vec<Row>) -> Self {
        self.rows.push(RowScript {
            fragment: fragment.to_string(),
            params: None,
            result: Ok(rows),
        });
        self
    }

    /// Answer a query containing `fragment` issued with exactly `params`
    pub fn on_query_with(mut self, fragment: &str, params: &[&str], rows: Vec<Row>) -> Self {
        self.rows.push(RowScript {
            fragment: fragment.to_string(),
            params: Some(params.iter().map(|p| p.to_string()).collect()),
            result: Ok(rows),
        });
        self
    }

    /// Fail any query containing `fragment`
    pub fn fail_query(mut self, fragment: &str, message: &str) -> Self {
        self.rows.push(RowScript {
            fragment: fragment.to_string(),
            params: None,
            result: Err(CatalogError::query(fragment, message)),
        });
        self
    }

    /// Describe `query` as `columns`
    pub fn on_describe(mut self, query: &str, columns: Vec<RawColumn>) -> Self {
        self.describes.push(DescribeScript {
            query: query.trim().to_string(),
            result: Ok(columns),
        });
        self
    }

    /// Fail the describe of `query`
    pub fn fail_describe(mut self, query: &str, message: &str) -> Self {
        self.describes.push(DescribeScript {
            query: query.trim().to_string(),
            result: Err(CatalogError::query(query, message)),
        });
        self
    }

    /// Every query issued so far, in order
    pub fn issued(&self) -> &[String] {
        &self.issued
    }

    /// Number of issued queries containing `fragment`
    pub fn count_issued(&self, fragment: &str) -> usize {
        self.issued.iter().filter(|q| q.contains(fragment)).count()
    }
}

#[async_trait::async_trait]
impl Connection for MockConnection {
    async fn fetch_rows(&mut self, query: &str, params: &[&str]) -> CatalogResult<Vec<Row>> {
        self.issued.push(query.to_string());
        self.rows
            .iter()
            .rev()
            .find(|script| script.matches(query, params))
            .map(|script| script.result.clone())
            .unwrap_or_else(|| {
                Err(CatalogError::query(
                    query,
                    format!("no scripted rows for params {:?}", params),
                ))
            })
    }

    async fn describe(&mut self, query: &str) -> CatalogResult<Vec<RawColumn>> {
        self.issued.push(query.to_string());
        let key = query.trim();
        self.describes
            .iter()
            .rev()
            .find(|script| script.query == key)
            .map(|script| script.result.clone())
            .unwrap_or_else(|| Err(CatalogError::query(query, "no scripted describe")))
    }
}

/// Builder for creating mock connections with a fluent API
pub struct MockConnectionBuilder {
    conn: MockConnection,
    database: Option<String>,
}

impl Default for MockConnectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectionBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            conn: MockConnection::new(),
            database: None,
        }
    }

    /// Select a current database
    pub fn with_database(mut self, name: &str) -> Self {
        self.conn = self
            .conn
            .on_query(mysql_queries::CURRENT_DATABASE, vec![row(&[name])]);
        self.database = Some(name.to_string());
        self
    }

    /// Script the standard test schema (users and orders tables) as the
    /// MySQL driver sees it
    ///
    /// The loaded result equals [`SchemaFixtures::standard_db`].
    ///
    /// [`SchemaFixtures::standard_db`]: crate::fixtures::SchemaFixtures::standard_db
    pub fn with_standard_schema(self) -> Self {
        use crate::fixtures::{RawColumnFixtures, STANDARD_DATABASE};
        use mysql_queries::*;

        let db = STANDARD_DATABASE;
        let mut builder = self.with_database(db);
        builder.conn = builder
            .conn
            .on_query_with(TABLE_NAMES, &[db], vec![row(&["users"]), row(&["orders"])])
            // users
            .on_describe("SELECT * FROM `users`", RawColumnFixtures::users())
            .on_query_with(AUTO_INC, &[db, "users", "%auto_increment%"], vec![row(&["id"])])
            .on_query_with(
                INDEX_NAMES,
                &[db, "users"],
                vec![row(&["PRIMARY"]), row(&["uniq_email"]), row(&["uniq_profile"])],
            )
            .on_query_with(INDEX, &[db, "users", "PRIMARY"], vec![row(&["0", "id", "1"])])
            .on_query_with(INDEX, &[db, "users", "uniq_email"], vec![row(&["0", "email", "1"])])
            .on_query_with(
                INDEX,
                &[db, "users", "uniq_profile"],
                vec![
                    row(&["0", "name", "1"]),
                    row(&["0", "email", "2"]),
                    row(&["0", "created_at", "3"]),
                ],
            )
            .on_query_with(FK_NAMES, &[db, "users"], vec![])
            // orders
            .on_describe("SELECT * FROM `orders`", RawColumnFixtures::orders())
            .on_query_with(AUTO_INC, &[db, "orders", "%auto_increment%"], vec![row(&["id"])])
            .on_query_with(
                INDEX_NAMES,
                &[db, "orders"],
                vec![row(&["PRIMARY"]), row(&["idx_user"])],
            )
            .on_query_with(INDEX, &[db, "orders", "PRIMARY"], vec![row(&["0", "id", "1"])])
            .on_query_with(INDEX, &[db, "orders", "idx_user"], vec![row(&["1", "user_id", "1"])])
            .on_query_with(FK_NAMES, &[db, "orders"], vec![row(&["fk_orders_user"])])
            .on_query_with(
                FK,
                &[db, "orders", "fk_orders_user"],
                vec![row(&["user_id", "1", "users", "id"])],
            );
        builder
    }

    /// Add a custom row script
    pub fn with_rows(mut self, fragment: &str, params: &[&str], rows: Vec<Row>) -> Self {
        self.conn = self.conn.on_query_with(fragment, params, rows);
        self
    }

    /// Add a custom describe script
    pub fn with_describe(mut self, query: &str, columns: Vec<RawColumn>) -> Self {
        self.conn = self.conn.on_describe(query, columns);
        self
    }

    /// Name of the selected database, if any
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Build the mock connection
    pub fn build(self) -> MockConnection {
        self.conn
    }
}
