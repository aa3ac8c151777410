// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema model
//!
//! This module defines the in-memory graph of tables, columns, indexes and
//! foreign keys produced by schema extraction. The graph is built once per
//! run and is read-only afterwards.
//!
//! Index and foreign key columns are stored as ordinal positions into the
//! owning table's column list, so a composite key keeps its declared order
//! and can never point at a column the table does not have.

use std::collections::HashMap;

use serde::Serialize;

use crate::canonical::CanonicalType;

/// Metadata for a table column or a query result column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Zero-based ordinal position
    pub position: usize,
    /// Canonical data type
    pub data_type: CanonicalType,
    /// Whether the column is nullable
    pub nullable: bool,
    /// Owning table, `None` for query result columns
    pub table: Option<String>,
}

impl ColumnInfo {
    /// Create a new column with builder pattern
    pub fn new(name: impl Into<String>, position: usize, data_type: CanonicalType) -> Self {
        Self {
            name: name.into(),
            position,
            data_type,
            nullable: false,
            table: None,
        }
    }

    /// Builder method: set nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method: set owning table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// Metadata for an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
    /// Index name
    pub name: String,
    /// Column positions, in key order
    pub columns: Vec<usize>,
    /// Whether this is the primary key
    pub is_primary: bool,
    /// Whether this index enforces uniqueness
    pub is_unique: bool,
}

/// Metadata for a foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyInfo {
    /// Constraint name
    pub name: String,
    /// Local column positions, in key order
    pub columns: Vec<usize>,
    /// Referenced table name
    pub ref_table: String,
    /// Referenced column names, position-for-position with `columns`
    pub ref_columns: Vec<String>,
}

/// Metadata for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// Columns in physical ordinal order
    pub columns: Vec<ColumnInfo>,
    /// Position of the auto increment column, if any
    pub auto_inc_column: Option<usize>,
    /// Index definitions
    pub indexes: Vec<IndexInfo>,
    /// Foreign key definitions
    pub foreign_keys: Vec<ForeignKeyInfo>,
}

impl TableInfo {
    /// Create a table from its columns
    pub fn new(name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            name: name.into(),
            columns,
            auto_inc_column: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Ordinal position of a column by name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The auto increment column, if the table has one
    pub fn auto_inc(&self) -> Option<&ColumnInfo> {
        self.auto_inc_column.and_then(|pos| self.columns.get(pos))
    }

    /// The primary key index, if the table has one
    pub fn primary_key(&self) -> Option<&IndexInfo> {
        self.indexes.iter().find(|i| i.is_primary)
    }

    /// Get index by name
    pub fn index(&self, name: &str) -> Option<&IndexInfo> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Get foreign key by name
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKeyInfo> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }

    /// Resolve a list of column positions to their columns
    pub fn columns_at<'a>(&'a self, positions: &'a [usize]) -> impl Iterator<Item = &'a ColumnInfo> + 'a {
        positions.iter().filter_map(|pos| self.columns.get(*pos))
    }
}

/// The whole schema of one database
#[derive(Debug, Clone, Default, Serialize)]
pub struct DbInfo {
    tables: Vec<TableInfo>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl DbInfo {
    /// Build the schema from its tables, keeping the given order
    pub fn new(tables: Vec<TableInfo>) -> Self {
        let by_name = tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        Self { tables, by_name }
    }

    /// All tables, in extraction order
    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }

    /// Get table by name
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.by_name.get(name).map(|i| &self.tables[*i])
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the schema has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// A copy restricted to tables accepted by `keep`
    pub fn filtered(&self, mut keep: impl FnMut(&TableInfo) -> bool) -> DbInfo {
        DbInfo::new(self.tables.iter().filter(|t| keep(t)).cloned().collect())
    }
}

impl PartialEq for DbInfo {
    fn eq(&self, other: &Self) -> bool {
        self.tables == other.tables
    }
}
