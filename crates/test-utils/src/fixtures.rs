// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: the standard schema and sample statement documents

use sqlforge_catalog::{raw_column_from_type_name, RawColumn};
use sqlforge_ir::{CanonicalType, ColumnInfo, DbInfo, ForeignKeyInfo, IndexInfo, TableInfo};

/// Current database of the standard scripted connection
pub const STANDARD_DATABASE: &str = "app";

/// Result columns as the MySQL connection reports them
pub struct RawColumnFixtures;

impl RawColumnFixtures {
    /// `SELECT * FROM users`
    pub fn users() -> Vec<RawColumn> {
        vec![
            raw_column_from_type_name("id", "BIGINT UNSIGNED", Some(false)),
            raw_column_from_type_name("email", "VARCHAR", Some(false)),
            raw_column_from_type_name("name", "VARCHAR", Some(true)),
            raw_column_from_type_name("active", "BOOLEAN", Some(false)),
            raw_column_from_type_name("created_at", "DATETIME", Some(true)),
        ]
    }

    /// `SELECT * FROM orders`
    pub fn orders() -> Vec<RawColumn> {
        vec![
            raw_column_from_type_name("id", "BIGINT", Some(false)),
            raw_column_from_type_name("user_id", "BIGINT UNSIGNED", Some(false)),
            raw_column_from_type_name("total", "DOUBLE", Some(true)),
            raw_column_from_type_name("status", "VARCHAR", Some(false)),
            raw_column_from_type_name("meta", "JSON", Some(true)),
        ]
    }
}

/// Ready-made schema graphs
pub struct SchemaFixtures;

impl SchemaFixtures {
    /// The users and orders tables
    pub fn standard_db() -> DbInfo {
        DbInfo::new(vec![Self::users(), Self::orders()])
    }

    /// `users`: unsigned auto increment key, a unique email, and a three
    /// column unique index declared out of physical order
    pub fn users() -> TableInfo {
        let mut table = TableInfo::new(
            "users",
            vec![
                column("users", "id", 0, CanonicalType::Uint64, false),
                column("users", "email", 1, CanonicalType::String, false),
                column("users", "name", 2, CanonicalType::String, true),
                column("users", "active", 3, CanonicalType::Bool, false),
                column("users", "created_at", 4, CanonicalType::Time, true),
            ],
        );
        table.auto_inc_column = Some(0);
        table.indexes = vec![
            index("PRIMARY", &[0], true, true),
            index("uniq_email", &[1], false, true),
            index("uniq_profile", &[2, 1, 4], false, true),
        ];
        table
    }

    /// `orders`: references `users` through `user_id`
    pub fn orders() -> TableInfo {
        let mut table = TableInfo::new(
            "orders",
            vec![
                column("orders", "id", 0, CanonicalType::Int64, false),
                column("orders", "user_id", 1, CanonicalType::Uint64, false),
                column("orders", "total", 2, CanonicalType::Float64, true),
                column("orders", "status", 3, CanonicalType::String, false),
                column("orders", "meta", 4, CanonicalType::Json, true),
            ],
        );
        table.auto_inc_column = Some(0);
        table.indexes = vec![
            index("PRIMARY", &[0], true, true),
            index("idx_user", &[1], false, false),
        ];
        table.foreign_keys = vec![ForeignKeyInfo {
            name: "fk_orders_user".to_string(),
            columns: vec![1],
            ref_table: "users".to_string(),
            ref_columns: vec!["id".to_string()],
        }];
        table
    }
}

/// Sample statement documents
pub struct TemplateFixtures;

impl TemplateFixtures {
    /// A document with one SELECT using every builtin directive
    pub const fn user_queries() -> &'static str {
        r#"<stmts>
  <stmt name="GetUser" single="true">
    SELECT <wc table="users" as="u"/> FROM users AS u
    WHERE u.id = <arg name="id" type="uint64">1</arg>
  </stmt>
  <stmt name="CountActive">
    SELECT COUNT(*) AS <replace with="cnt">n</replace> FROM users WHERE active = 1
  </stmt>
  <stmt name="Deactivate">
    UPDATE users SET active = 0 WHERE id = <arg name="id" type="uint64">1</arg>
  </stmt>
</stmts>"#
    }

    /// A document using a tag no directive is registered for
    pub const fn unknown_tag() -> &'static str {
        "<stmts>\n  <stmt name=\"Bad\">SELECT <bogus/> FROM users</stmt>\n</stmts>"
    }
}

fn column(table: &str, name: &str, position: usize, ty: CanonicalType, nullable: bool) -> ColumnInfo {
    ColumnInfo::new(name, position, ty)
        .with_nullable(nullable)
        .with_table(table)
}

fn index(name: &str, columns: &[usize], is_primary: bool, is_unique: bool) -> IndexInfo {
    IndexInfo {
        name: name.to_string(),
        columns: columns.to_vec(),
        is_primary,
        is_unique,
    }
}
