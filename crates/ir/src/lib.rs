// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge - Intermediate Representation
//!
//! This crate provides the engine independent vocabulary shared by every
//! other sqlforge crate:
//! - the closed set of canonical column types
//! - dialects and identifier quoting
//! - the schema model (tables, columns, indexes, foreign keys)

pub mod canonical;
pub mod dialect;
pub mod schema;

// Re-export commonly used types
pub use canonical::{CanonicalType, UnknownCanonicalType};
pub use dialect::Dialect;
pub use schema::{ColumnInfo, DbInfo, ForeignKeyInfo, IndexInfo, TableInfo};
