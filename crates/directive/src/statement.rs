// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement templates
//!
//! A [`StatementTemplate`] is a parsed and initialized directive chain. It
//! is immutable once built and can be compiled any number of times.

use std::collections::BTreeMap;

use sqlforge_ir::{DbInfo, Dialect};
use tracing::debug;

use crate::directive::{Argument, Directive, DirectiveContext, Literal, ResultColumnType};
use crate::error::{DirectiveError, DirectiveResult};
use crate::registry::DirectiveRegistry;
use crate::template::{parse_document, Position, StatementSource, TemplateNode};

/// An initialized directive chain with its declared identity
#[derive(Debug)]
pub struct StatementTemplate {
    name: String,
    hints: BTreeMap<String, String>,
    position: Position,
    directives: Vec<Box<dyn Directive>>,
    args: Vec<Argument>,
}

impl StatementTemplate {
    /// Instantiate and initialize the directives of one statement
    ///
    /// Text nodes become [`Literal`] directives; elements are created from
    /// the registry by tag. Initialization runs in document order.
    ///
    /// # Errors
    ///
    /// Returns `DirectiveError::UnknownDirective` (with the statement name and
    /// the element's line and column) for an unregistered tag, and any error
    /// a directive raises while initializing.
    pub fn build(
        source: &StatementSource,
        registry: &DirectiveRegistry,
        db: &DbInfo,
        dialect: Dialect,
    ) -> DirectiveResult<Self> {
        let mut ctx = DirectiveContext::new(&source.name, db, dialect);
        let mut directives = Vec::with_capacity(source.nodes.len());

        for node in &source.nodes {
            let mut directive: Box<dyn Directive> = match node {
                TemplateNode::Text(_) => Box::new(Literal::default()),
                TemplateNode::Element(elem) => {
                    registry
                        .create(&elem.tag)
                        .ok_or_else(|| DirectiveError::UnknownDirective {
                            tag: elem.tag.clone(),
                            statement: source.name.clone(),
                            line: elem.position.line,
                            column: elem.position.column,
                        })?
                }
            };
            directive.initialize(&mut ctx, node)?;
            directives.push(directive);
        }

        debug!(
            "Built statement '{}' with {} directives",
            source.name,
            directives.len()
        );
        Ok(Self {
            name: source.name.clone(),
            hints: source.hints.clone(),
            position: source.position,
            directives,
            args: ctx.into_arguments(),
        })
    }

    /// Statement name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared result shape hints
    pub fn hints(&self) -> &BTreeMap<String, String> {
        &self.hints
    }

    /// Location of the statement in its document
    pub fn position(&self) -> Position {
        self.position
    }

    /// Declared arguments, in document order
    pub fn arguments(&self) -> &[Argument] {
        &self.args
    }

    /// Number of directives in the chain
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Final query text
    pub fn generate(&self) -> DirectiveResult<String> {
        self.directives.iter().map(|d| d.generate()).collect()
    }

    /// Probe query text
    pub fn generate_query(&self) -> DirectiveResult<String> {
        self.directives.iter().map(|d| d.generate_query()).collect()
    }

    /// Let every directive adjust the discovered metadata, in document order
    pub fn process_query_result(
        &self,
        names: &mut Vec<String>,
        types: &mut Vec<ResultColumnType>,
    ) -> DirectiveResult<()> {
        for directive in &self.directives {
            directive.process_query_result(names, types)?;
        }
        Ok(())
    }
}

/// Parse a document and build every statement in it
pub fn build_document(
    text: &str,
    registry: &DirectiveRegistry,
    db: &DbInfo,
    dialect: Dialect,
) -> DirectiveResult<Vec<StatementTemplate>> {
    parse_document(text)?
        .iter()
        .map(|source| StatementTemplate::build(source, registry, db, dialect))
        .collect()
}
