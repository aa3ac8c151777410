// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Support
//!
//! Dialects decide how identifiers are embedded into generated SQL text.
//!
//! ## MySQL Family
//!
//! MySQL, TiDB and MariaDB share backtick identifier quoting and the
//! `information_schema` layout used by the MySQL driver, so all three are
//! served by the same driver implementation.

use serde::{Deserialize, Serialize};

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Dialect {
    /// MySQL (5.7, 8.0)
    MySQL,
    /// TiDB (5.0 and later)
    TiDB,
    /// MariaDB (10.x, 11.x)
    MariaDB,
}

impl Dialect {
    /// Lowercase name, as used by driver registration
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySQL => "mysql",
            Dialect::TiDB => "tidb",
            Dialect::MariaDB => "mariadb",
        }
    }

    /// Quote an identifier for embedding into literal SQL
    ///
    /// Embedded backticks are doubled.
    pub fn quote_identifier(&self, identifier: &str) -> String {
        match self {
            Dialect::MySQL | Dialect::TiDB | Dialect::MariaDB => {
                format!("`{}`", identifier.replace('`', "``"))
            }
        }
    }
}
