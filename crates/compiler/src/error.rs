// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for compilation
//!
//! A run has no partial-success mode: the first error ends it. Errors raised
//! while compiling a statement carry the document, the statement name and,
//! once the probe has been assembled, the offending query.

use sqlforge_catalog::CatalogError;
use sqlforge_directive::DirectiveError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::type_map::TypeMapError;

/// Result type alias for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// What went wrong inside one statement
#[derive(Debug, Error, Clone)]
pub enum StatementFailure {
    /// A directive failed to generate or post-process
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// Probing or classification failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Directives left names and types out of step
    #[error("result has {names} names but {types} types after processing")]
    ResultShape { names: usize, types: usize },
}

/// Errors that can occur during a generator run
#[derive(Debug, Error, Clone)]
pub enum CompileError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Driver lookup or schema extraction failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid type mapping
    #[error(transparent)]
    TypeMap(#[from] TypeMapError),

    /// A document could not be parsed or its directives initialized
    #[error("{document}: {source}")]
    Document {
        document: String,
        #[source]
        source: DirectiveError,
    },

    /// A statement failed to compile
    #[error("{document}: statement '{statement}': {source}{}", query_suffix(.query))]
    Statement {
        document: String,
        statement: String,
        query: Option<String>,
        #[source]
        source: StatementFailure,
    },
}

fn query_suffix(query: &Option<String>) -> String {
    match query {
        Some(q) => format!("\n  Query: {}", q),
        None => String::new(),
    }
}

impl CompileError {
    /// Name of the failing statement, if the error is statement-scoped
    pub fn statement(&self) -> Option<&str> {
        match self {
            CompileError::Statement { statement, .. } => Some(statement),
            _ => None,
        }
    }

    /// Offending query, if one had been assembled
    pub fn query(&self) -> Option<&str> {
        match self {
            CompileError::Statement { query, .. } => query.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_error_message() {
        let err = CompileError::Statement {
            document: "users.xml".to_string(),
            statement: "GetUser".to_string(),
            query: Some("SELECT 1".to_string()),
            source: StatementFailure::Catalog(CatalogError::query("SELECT 1", "boom")),
        };
        let message = err.to_string();
        assert!(message.starts_with("users.xml: statement 'GetUser': "));
        assert!(message.contains("boom"));
        assert!(message.ends_with("\n  Query: SELECT 1"));
        assert_eq!(err.statement(), Some("GetUser"));
        assert_eq!(err.query(), Some("SELECT 1"));
    }
}
