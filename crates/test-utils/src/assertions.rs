// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Schema-specific test helpers and custom assertions

use sqlforge_ir::{CanonicalType, ColumnInfo, TableInfo};

/// Custom assertion helpers for schema testing
pub struct SchemaAssertions;

impl SchemaAssertions {
    /// Assert that a column has the given properties
    pub fn assert_column(column: &ColumnInfo, name: &str, data_type: CanonicalType, nullable: bool) {
        assert_eq!(column.name, name, "Column name mismatch");
        assert_eq!(column.data_type, data_type, "Column data type mismatch for '{}'", name);
        assert_eq!(column.nullable, nullable, "Column nullable mismatch for '{}'", name);
    }

    /// Assert the table's column names, in ordinal order
    pub fn assert_column_order(table: &TableInfo, expected: &[&str]) {
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected, "Column order mismatch for table '{}'", table.name);
        for (i, column) in table.columns.iter().enumerate() {
            assert_eq!(column.position, i, "Column '{}' has wrong position", column.name);
        }
    }

    /// Assert an index's column names in key order and its flags
    pub fn assert_index(
        table: &TableInfo,
        index: &str,
        columns: &[&str],
        is_primary: bool,
        is_unique: bool,
    ) {
        let Some(info) = table.index(index) else {
            panic!("Index '{}' not found on table '{}'", index, table.name);
        };
        let names: Vec<&str> = table.columns_at(&info.columns).map(|c| c.name.as_str()).collect();
        assert_eq!(names, columns, "Index '{}' column order mismatch", index);
        assert_eq!(info.is_primary, is_primary, "Index '{}' primary mismatch", index);
        assert_eq!(info.is_unique, is_unique, "Index '{}' unique mismatch", index);
    }
}
