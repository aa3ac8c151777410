// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for directive parsing and evaluation
//!
//! All of these are configuration errors in the template: they are reported
//! immediately and never retried.

use thiserror::Error;

/// Result type alias for directive operations
pub type DirectiveResult<T> = Result<T, DirectiveError>;

/// Errors that can occur while parsing, initializing or running directives
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// The document is not well-formed markup
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// No directive is registered for a tag
    #[error("Unknown directive <{tag}> in statement '{statement}' at {line}:{column}")]
    UnknownDirective {
        tag: String,
        statement: String,
        line: u32,
        column: u32,
    },

    /// A required attribute is absent or empty
    #[error("Missing '{attribute}' attribute in <{directive}> directive of statement '{statement}'")]
    MissingAttribute {
        directive: String,
        attribute: String,
        statement: String,
    },

    /// An attribute value is not acceptable
    #[error("Invalid '{attribute}' attribute {value:?} in <{directive}> directive: {reason}")]
    InvalidAttribute {
        directive: String,
        attribute: String,
        value: String,
        reason: String,
    },

    /// A directive needs text content and has none
    #[error("Missing content in <{directive}> directive of statement '{statement}'")]
    MissingContent { directive: String, statement: String },

    /// A `wc` directive names a table the schema does not have
    #[error("Unknown table '{table}' in statement '{statement}'")]
    UnknownTable { table: String, statement: String },

    /// Two arguments of one statement share a name
    #[error("Duplicate argument '{name}' in statement '{statement}'")]
    DuplicateArgument { name: String, statement: String },

    /// A statement element has no `name` attribute
    #[error("Missing statement name at {line}:{column}")]
    MissingStatementName { line: u32, column: u32 },

    /// Two statements of one document share a name
    #[error("Duplicate statement name '{name}' at {line}:{column}")]
    DuplicateStatementName { name: String, line: u32, column: u32 },
}

impl DirectiveError {
    /// Create a MissingAttribute error
    pub fn missing_attribute(directive: &str, attribute: &str, statement: &str) -> Self {
        DirectiveError::MissingAttribute {
            directive: directive.to_string(),
            attribute: attribute.to_string(),
            statement: statement.to_string(),
        }
    }
}

impl From<roxmltree::Error> for DirectiveError {
    fn from(err: roxmltree::Error) -> Self {
        DirectiveError::MalformedTemplate(err.to_string())
    }
}
