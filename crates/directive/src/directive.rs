// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Directive trait
//!
//! A statement template is an ordered chain of directives. Each one
//! contributes a fragment to the final query text and a possibly different
//! fragment to the probe query used to discover the result columns, and may
//! adjust the discovered column metadata afterwards.
//!
//! Directives are created by a factory, initialized once from their template
//! node, and are immutable from then on.

use std::fmt;

use serde::Serialize;
use sqlforge_ir::{CanonicalType, ColumnInfo, DbInfo, Dialect};

use crate::error::{DirectiveError, DirectiveResult};
use crate::template::TemplateNode;

/// Discovered type of one result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultColumnType {
    pub data_type: CanonicalType,
    pub nullable: bool,
}

impl From<&ColumnInfo> for ResultColumnType {
    fn from(column: &ColumnInfo) -> Self {
        Self {
            data_type: column.data_type,
            nullable: column.nullable,
        }
    }
}

/// A statement argument declared by an `arg` directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Argument name, unique within the statement
    pub name: String,
    /// Declared type, passed through verbatim
    pub type_hint: Option<String>,
    /// Sample value substituted into the probe query
    pub sample: String,
}

/// What a directive sees while it initializes
#[derive(Debug)]
pub struct DirectiveContext<'a> {
    statement: &'a str,
    db: &'a DbInfo,
    dialect: Dialect,
    args: Vec<Argument>,
}

impl<'a> DirectiveContext<'a> {
    /// Create a context for one statement
    pub fn new(statement: &'a str, db: &'a DbInfo, dialect: Dialect) -> Self {
        Self {
            statement,
            db,
            dialect,
            args: Vec::new(),
        }
    }

    /// Name of the owning statement
    pub fn statement(&self) -> &str {
        self.statement
    }

    /// The loaded schema
    pub fn db(&self) -> &DbInfo {
        self.db
    }

    /// Quote an identifier for the target engine
    pub fn quote(&self, identifier: &str) -> String {
        self.dialect.quote_identifier(identifier)
    }

    /// Declare a statement argument
    ///
    /// # Errors
    ///
    /// Returns `DirectiveError::DuplicateArgument` if the name is taken.
    pub fn declare_argument(&mut self, arg: Argument) -> DirectiveResult<()> {
        if self.args.iter().any(|a| a.name == arg.name) {
            return Err(DirectiveError::DuplicateArgument {
                name: arg.name,
                statement: self.statement.to_string(),
            });
        }
        self.args.push(arg);
        Ok(())
    }

    /// Arguments declared so far, in document order
    pub fn into_arguments(self) -> Vec<Argument> {
        self.args
    }
}

/// One fragment of a statement template
///
/// Every directive supports all four operations. Only SELECT statements
/// reach [`generate_query`](Directive::generate_query) and
/// [`process_query_result`](Directive::process_query_result).
pub trait Directive: fmt::Debug + Send + Sync {
    /// Read configuration from the template node
    ///
    /// # Errors
    ///
    /// Fails descriptively when required configuration is absent.
    fn initialize(&mut self, ctx: &mut DirectiveContext<'_>, node: &TemplateNode) -> DirectiveResult<()>;

    /// Fragment of the final query
    fn generate(&self) -> DirectiveResult<String>;

    /// Fragment of the probe query
    fn generate_query(&self) -> DirectiveResult<String>;

    /// Adjust discovered result metadata in place
    fn process_query_result(
        &self,
        names: &mut Vec<String>,
        types: &mut Vec<ResultColumnType>,
    ) -> DirectiveResult<()>;
}

/// Plain SQL text, identical in both queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Literal {
    text: String,
}

impl Literal {
    /// Create a literal directly from text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Directive for Literal {
    fn initialize(&mut self, _ctx: &mut DirectiveContext<'_>, node: &TemplateNode) -> DirectiveResult<()> {
        match node {
            TemplateNode::Text(text) => {
                self.text = text.clone();
                Ok(())
            }
            TemplateNode::Element(elem) => Err(DirectiveError::MalformedTemplate(format!(
                "literal text expected, found <{}>",
                elem.tag
            ))),
        }
    }

    fn generate(&self) -> DirectiveResult<String> {
        Ok(self.text.clone())
    }

    fn generate_query(&self) -> DirectiveResult<String> {
        Ok(self.text.clone())
    }

    fn process_query_result(
        &self,
        _names: &mut Vec<String>,
        _types: &mut Vec<ResultColumnType>,
    ) -> DirectiveResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_same_in_both_queries() {
        let db = DbInfo::default();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        let mut literal = Literal::default();
        literal
            .initialize(&mut ctx, &TemplateNode::Text("SELECT 1".to_string()))
            .unwrap();
        assert_eq!(literal.generate().unwrap(), "SELECT 1");
        assert_eq!(literal.generate_query().unwrap(), "SELECT 1");

        let mut names = vec!["x".to_string()];
        let mut types = vec![ResultColumnType {
            data_type: CanonicalType::Int64,
            nullable: false,
        }];
        literal.process_query_result(&mut names, &mut types).unwrap();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_duplicate_argument() {
        let db = DbInfo::default();
        let mut ctx = DirectiveContext::new("GetUser", &db, Dialect::MySQL);
        let arg = Argument {
            name: "id".to_string(),
            type_hint: None,
            sample: "1".to_string(),
        };
        ctx.declare_argument(arg.clone()).unwrap();
        let err = ctx.declare_argument(arg).unwrap_err();
        assert!(err.to_string().contains("GetUser"));
        assert_eq!(ctx.into_arguments().len(), 1);
    }
}
