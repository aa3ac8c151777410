// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement documents
//!
//! A document is one markup root whose child elements are statements:
//!
//! ```xml
//! <stmts>
//!   <stmt name="GetUser">
//!     SELECT <wc table="users"/> FROM users WHERE id = <arg name="id">1</arg>
//!   </stmt>
//! </stmts>
//! ```
//!
//! Each statement keeps its ordered child nodes, text versus element, so
//! that directives can be instantiated in document order. SQL text that
//! contains `<` or `&` must be escaped or wrapped in CDATA.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{DirectiveError, DirectiveResult};

/// 1-based line and column in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A child node of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// Character data, CDATA included
    Text(String),
    /// A directive element
    Element(ElementNode),
}

/// A directive element with its attributes and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name
    pub tag: String,
    /// Attributes by name
    pub attributes: BTreeMap<String, String>,
    /// Child nodes
    pub children: Vec<TemplateNode>,
    /// Location of the opening tag
    pub position: Position,
}

impl ElementNode {
    /// An attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// An attribute value, `None` when absent or empty
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.is_empty())
    }

    /// Text before the first child element
    pub fn text(&self) -> &str {
        match self.children.first() {
            Some(TemplateNode::Text(text)) => text,
            _ => "",
        }
    }
}

/// One statement element of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSource {
    /// Value of the `name` attribute
    pub name: String,
    /// Every other attribute, kept as result shape hints
    pub hints: BTreeMap<String, String>,
    /// Child nodes in document order
    pub nodes: Vec<TemplateNode>,
    /// Location of the opening tag
    pub position: Position,
}

/// Parse a document into its statements
///
/// # Errors
///
/// Returns `DirectiveError::MalformedTemplate` for markup errors or stray text
/// between statements, `MissingStatementName` and `DuplicateStatementName`
/// for bad statement identities.
pub fn parse_document(text: &str) -> DirectiveResult<Vec<StatementSource>> {
    let doc = roxmltree::Document::parse(text)?;
    let mut seen = HashSet::new();
    let mut statements = Vec::new();

    for node in doc.root_element().children() {
        if node.is_text() {
            if node.text().is_some_and(|t| !t.trim().is_empty()) {
                let pos = position_of(&doc, &node);
                return Err(DirectiveError::MalformedTemplate(format!(
                    "unexpected text outside statements at {}:{}",
                    pos.line, pos.column
                )));
            }
            continue;
        }
        if !node.is_element() {
            continue;
        }

        let position = position_of(&doc, &node);
        let name = match node.attribute("name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(DirectiveError::MissingStatementName {
                    line: position.line,
                    column: position.column,
                });
            }
        };
        if !seen.insert(name.clone()) {
            return Err(DirectiveError::DuplicateStatementName {
                name,
                line: position.line,
                column: position.column,
            });
        }

        let hints = node
            .attributes()
            .filter(|attr| attr.name() != "name")
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        statements.push(StatementSource {
            name,
            hints,
            nodes: convert_children(&doc, &node),
            position,
        });
    }

    Ok(statements)
}

fn convert_children(doc: &roxmltree::Document<'_>, node: &roxmltree::Node<'_, '_>) -> Vec<TemplateNode> {
    let mut nodes: Vec<TemplateNode> = Vec::new();
    for child in node.children() {
        if child.is_text() {
            let text = child.text().unwrap_or_default();
            // Adjacent text split by a comment is one run of SQL
            if let Some(TemplateNode::Text(prev)) = nodes.last_mut() {
                prev.push_str(text);
            } else {
                nodes.push(TemplateNode::Text(text.to_string()));
            }
        } else if child.is_element() {
            nodes.push(TemplateNode::Element(ElementNode {
                tag: child.tag_name().name().to_string(),
                attributes: child
                    .attributes()
                    .map(|attr| (attr.name().to_string(), attr.value().to_string()))
                    .collect(),
                children: convert_children(doc, &child),
                position: position_of(doc, &child),
            }));
        }
    }
    nodes
}

fn position_of(doc: &roxmltree::Document<'_>, node: &roxmltree::Node<'_, '_>) -> Position {
    let pos = doc.text_pos_at(node.range().start);
    Position {
        line: pos.row,
        column: pos.col,
    }
}
