// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin directive definitions
//!
//! - `replace`: probe with the element text, emit the `with` attribute
//! - `arg`: declare a statement argument, emit a placeholder
//! - `wc`: expand to the qualified column list of a table

pub mod arg;
pub mod replace;
pub mod wildcard;

use crate::directive::DirectiveContext;
use crate::error::{DirectiveError, DirectiveResult};
use crate::registry::DirectiveRegistry;
use crate::template::{ElementNode, TemplateNode};

/// Register every builtin directive
pub fn register_all(registry: &mut DirectiveRegistry) {
    registry.register(|| Box::new(replace::Replace::default()), &["replace"]);
    registry.register(|| Box::new(arg::Arg::default()), &["arg"]);
    registry.register(|| Box::new(wildcard::Wildcard::default()), &["wc"]);
}

fn expect_element<'n>(
    node: &'n TemplateNode,
    directive: &str,
    ctx: &DirectiveContext<'_>,
) -> DirectiveResult<&'n ElementNode> {
    match node {
        TemplateNode::Element(elem) => Ok(elem),
        TemplateNode::Text(_) => Err(DirectiveError::MalformedTemplate(format!(
            "<{}> directive of statement '{}' built from text",
            directive,
            ctx.statement()
        ))),
    }
}

fn required_attribute<'n>(
    elem: &'n ElementNode,
    attribute: &str,
    ctx: &DirectiveContext<'_>,
) -> DirectiveResult<&'n str> {
    elem.non_empty_attribute(attribute)
        .ok_or_else(|| DirectiveError::missing_attribute(&elem.tag, attribute, ctx.statement()))
}
