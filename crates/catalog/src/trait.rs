// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Driver trait for schema and type introspection
//!
//! One implementation exists per database engine. Every operation runs
//! against a caller-supplied [`Connection`], so the same driver value can be
//! shared across runs while the connection stays owned by the caller.

use async_trait::async_trait;
use sqlforge_ir::{CanonicalType, ColumnInfo, Dialect};

use crate::connection::Connection;
use crate::error::CatalogResult;
use crate::scan::RawColumn;

/// Index definition as extracted from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    /// Column names, in key order
    pub columns: Vec<String>,
    /// Whether this is the primary key
    pub is_primary: bool,
    /// Whether the index is unique
    pub is_unique: bool,
}

/// Foreign key definition as extracted from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDefinition {
    /// Local column names, in key order
    pub columns: Vec<String>,
    /// Referenced table
    pub ref_table: String,
    /// Referenced column names, position-for-position with `columns`
    pub ref_columns: Vec<String>,
}

/// Driver capability for one database engine
///
/// # Examples
///
/// ```rust,ignore
/// use sqlforge_catalog::{Driver, MySqlDriver};
///
/// let driver = MySqlDriver::new();
/// for table in driver.extract_table_names(&mut conn).await? {
///     let columns = driver.extract_columns(&mut conn, &table).await?;
///     println!("{}: {} columns", table, columns.len());
/// }
/// ```
#[async_trait]
pub trait Driver: Send + Sync {
    /// Registered driver name
    fn name(&self) -> &str;

    /// Dialect used for quoting
    fn dialect(&self) -> Dialect;

    /// Names of the base tables (views excluded) in the current database
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoDatabaseSelected` if the connection has no
    /// current database.
    async fn extract_table_names(&self, conn: &mut dyn Connection) -> CatalogResult<Vec<String>>;

    /// Columns of a table, in ordinal order
    ///
    /// Runs a `SELECT *` probe against the table and classifies it the same
    /// way as any other query result.
    async fn extract_columns(
        &self,
        conn: &mut dyn Connection,
        table: &str,
    ) -> CatalogResult<Vec<ColumnInfo>> {
        let query = format!("SELECT * FROM {}", self.quote(table));
        self.extract_query_result_columns(conn, &query).await
    }

    /// Result columns of an arbitrary query
    async fn extract_query_result_columns(
        &self,
        conn: &mut dyn Connection,
        query: &str,
    ) -> CatalogResult<Vec<ColumnInfo>> {
        let raw = conn.describe(query).await?;
        self.classify_columns(&raw)
    }

    /// Classify the columns of an already-described result
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnclassifiedColumn` for any signal the engine's
    /// classification table does not cover.
    fn classify_columns(&self, raw: &[RawColumn]) -> CatalogResult<Vec<ColumnInfo>>;

    /// Name of the table's auto increment column, if any
    ///
    /// Engines without auto increment columns keep the default.
    async fn extract_auto_inc_column(
        &self,
        _conn: &mut dyn Connection,
        _table: &str,
    ) -> CatalogResult<Option<String>> {
        Ok(None)
    }

    /// Names of every index on a table
    async fn extract_index_names(
        &self,
        conn: &mut dyn Connection,
        table: &str,
    ) -> CatalogResult<Vec<String>>;

    /// One index, columns in key order
    async fn extract_index(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        index: &str,
    ) -> CatalogResult<IndexDefinition>;

    /// Names of every foreign key on a table
    async fn extract_fk_names(
        &self,
        conn: &mut dyn Connection,
        table: &str,
    ) -> CatalogResult<Vec<String>>;

    /// One foreign key, columns in key order
    async fn extract_fk(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        fk: &str,
    ) -> CatalogResult<ForeignKeyDefinition>;

    /// Every canonical type this driver can produce
    fn data_types(&self) -> &[CanonicalType];

    /// Quote an identifier for embedding into generated SQL
    fn quote(&self, identifier: &str) -> String {
        self.dialect().quote_identifier(identifier)
    }
}
