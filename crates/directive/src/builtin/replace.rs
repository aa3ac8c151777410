// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `<replace with="?">1+1</replace>`
//!
//! The element text goes into the probe query, the `with` attribute into the
//! final query.

use super::{expect_element, required_attribute};
use crate::directive::{Directive, DirectiveContext, ResultColumnType};
use crate::error::DirectiveResult;
use crate::template::TemplateNode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replace {
    origin: String,
    with: String,
}

impl Directive for Replace {
    fn initialize(&mut self, ctx: &mut DirectiveContext<'_>, node: &TemplateNode) -> DirectiveResult<()> {
        let elem = expect_element(node, "replace", ctx)?;
        self.with = required_attribute(elem, "with", ctx)?.to_string();
        self.origin = elem.text().to_string();
        Ok(())
    }

    fn generate(&self) -> DirectiveResult<String> {
        Ok(self.with.clone())
    }

    fn generate_query(&self) -> DirectiveResult<String> {
        Ok(self.origin.clone())
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
    use crate::error::DirectiveError;
    use crate::template::{ElementNode, Position};
    use sqlforge_ir::{DbInfo, Dialect};

    fn element(with: Option<&str>, text: &str) -> TemplateNode {
        TemplateNode::Element(ElementNode {
            tag: "replace".to_string(),
            attributes: with
                .map(|w| [("with".to_string(), w.to_string())].into_iter().collect())
                .unwrap_or_default(),
            children: vec![TemplateNode::Text(text.to_string())],
            position: Position::default(),
        })
    }

    #[test]
    fn test_replace() {
        let db = DbInfo::default();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        let mut replace = Replace::default();
        replace.initialize(&mut ctx, &element(Some("?"), "1+1")).unwrap();
        assert_eq!(replace.generate().unwrap(), "?");
        assert_eq!(replace.generate_query().unwrap(), "1+1");
    }

    #[test]
    fn test_missing_with() {
        let db = DbInfo::default();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        for node in [element(None, "1"), element(Some(""), "1")] {
            let err = Replace::default().initialize(&mut ctx, &node).unwrap_err();
            assert!(matches!(
                err,
                DirectiveError::MissingAttribute { ref attribute, .. } if attribute == "with"
            ));
        }
    }
}
