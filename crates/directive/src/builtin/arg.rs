// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `<arg name="id" type="uint64">1</arg>`
//!
//! Declares a statement argument. The final query gets a `?` placeholder,
//! the probe query gets the sample value from the element text. The optional
//! `type` names a canonical type.

use super::{expect_element, required_attribute};
use crate::directive::{Argument, Directive, DirectiveContext, ResultColumnType};
use crate::error::{DirectiveError, DirectiveResult};
use crate::template::TemplateNode;
use sqlforge_ir::CanonicalType;

const PLACEHOLDER: &str = "?";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arg {
    sample: String,
}

impl Directive for Arg {
    fn initialize(&mut self, ctx: &mut DirectiveContext<'_>, node: &TemplateNode) -> DirectiveResult<()> {
        let elem = expect_element(node, "arg", ctx)?;
        let name = required_attribute(elem, "name", ctx)?.to_string();
        let sample = elem.text().trim();
        if sample.is_empty() {
            return Err(DirectiveError::MissingContent {
                directive: "arg".to_string(),
                statement: ctx.statement().to_string(),
            });
        }

        let type_hint = elem.non_empty_attribute("type");
        if let Some(hint) = type_hint {
            hint.parse::<CanonicalType>()
                .map_err(|e| DirectiveError::InvalidAttribute {
                    directive: "arg".to_string(),
                    attribute: "type".to_string(),
                    value: hint.to_string(),
                    reason: e.to_string(),
                })?;
        }

        self.sample = sample.to_string();
        ctx.declare_argument(Argument {
            name,
            type_hint: type_hint.map(str::to_string),
            sample: self.sample.clone(),
        })
    }

    fn generate(&self) -> DirectiveResult<String> {
        Ok(PLACEHOLDER.to_string())
    }

    fn generate_query(&self) -> DirectiveResult<String> {
        Ok(self.sample.clone())
    }

    fn process_query_result(
        &self,
        _names: &mut Vec<String>,
        _types: &mut Vec<ResultColumnType>,
    ) -> DirectiveResult<()> {
        Ok(())
    }
}
