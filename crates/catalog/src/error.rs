// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! Every catalog error is fatal for the unit of work that raised it: schema
//! extraction is all-or-nothing and nothing here is retried. [`ErrorKind`]
//! groups the variants so callers can report them uniformly.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Missing or invalid configuration, reported immediately
    Configuration,
    /// The catalog returned data that violates its own invariants
    Inconsistency,
    /// A column type signal has no entry in the classification table
    Classification,
    /// Connection or query failure against the live database
    Io,
}

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query execution failed: {message}\n  Query: {query}")]
    QueryFailed { query: String, message: String },

    /// The connection has no current database
    #[error("No database selected")]
    NoDatabaseSelected,

    /// No driver registered under the requested name
    #[error("Unknown driver '{0}'")]
    UnknownDriver(String),

    /// A result column could not be mapped to a canonical type
    #[error(
        "Unknown column type for '{column}': scan_type={scan_type} database_type_name={database_type_name:?}"
    )]
    UnclassifiedColumn {
        column: String,
        scan_type: String,
        database_type_name: String,
    },

    /// Catalog metadata violates an invariant (e.g. a gap in an ordinal sequence)
    #[error("Introspection inconsistency: {0}")]
    Inconsistency(String),

    /// A named index returned no rows
    #[error("Index '{index}' in table '{table}' not found")]
    IndexNotFound { table: String, index: String },

    /// A named foreign key returned no rows
    #[error("Foreign key '{name}' in table '{table}' not found")]
    ForeignKeyNotFound { table: String, name: String },

    /// Invalid catalog configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),
}

impl CatalogError {
    /// Create a QueryFailed error carrying the offending query
    pub fn query(query: impl Into<String>, message: impl ToString) -> Self {
        CatalogError::QueryFailed {
            query: query.into(),
            message: message.to_string(),
        }
    }

    /// Create an Inconsistency error
    pub fn inconsistency(message: impl Into<String>) -> Self {
        CatalogError::Inconsistency(message.into())
    }

    /// Which class of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ConnectionFailed(_) | CatalogError::QueryFailed { .. } => ErrorKind::Io,
            CatalogError::NoDatabaseSelected
            | CatalogError::UnknownDriver(_)
            | CatalogError::ConfigurationError(_) => ErrorKind::Configuration,
            CatalogError::UnclassifiedColumn { .. } => ErrorKind::Classification,
            CatalogError::Inconsistency(_)
            | CatalogError::IndexNotFound { .. }
            | CatalogError::ForeignKeyNotFound { .. } => ErrorKind::Inconsistency,
        }
    }
}
