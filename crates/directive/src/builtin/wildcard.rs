// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `<wc table="users" as="u"/>`
//!
//! Expands to every column of a schema table, qualified by the alias (or the
//! table name) and quoted for the engine:
//! `` `u`.`id`, `u`.`email`, ... ``.

use super::{expect_element, required_attribute};
use crate::directive::{Directive, DirectiveContext, ResultColumnType};
use crate::error::{DirectiveError, DirectiveResult};
use crate::template::TemplateNode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wildcard {
    expansion: String,
}

impl Directive for Wildcard {
    fn initialize(&mut self, ctx: &mut DirectiveContext<'_>, node: &TemplateNode) -> DirectiveResult<()> {
        let elem = expect_element(node, "wc", ctx)?;
        let table_name = required_attribute(elem, "table", ctx)?;
        let Some(table) = ctx.db().table(table_name) else {
            return Err(DirectiveError::UnknownTable {
                table: table_name.to_string(),
                statement: ctx.statement().to_string(),
            });
        };
        let qualifier = ctx.quote(elem.non_empty_attribute("as").unwrap_or(table_name));

        self.expansion = table
            .columns
            .iter()
            .map(|column| format!("{}.{}", qualifier, ctx.quote(&column.name)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(())
    }

    fn generate(&self) -> DirectiveResult<String> {
        Ok(self.expansion.clone())
    }

    fn generate_query(&self) -> DirectiveResult<String> {
        Ok(self.expansion.clone())
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
    use crate::template::{ElementNode, Position};
    use sqlforge_ir::{CanonicalType, ColumnInfo, DbInfo, Dialect, TableInfo};

    fn db() -> DbInfo {
        DbInfo::new(vec![TableInfo::new(
            "users",
            vec![
                ColumnInfo::new("id", 0, CanonicalType::Uint64),
                ColumnInfo::new("email", 1, CanonicalType::String),
            ],
        )])
    }

    fn element(attrs: &[(&str, &str)]) -> TemplateNode {
        TemplateNode::Element(ElementNode {
            tag: "wc".to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: vec![],
            position: Position::default(),
        })
    }

    #[test]
    fn test_expansion_with_alias() {
        let db = db();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        let mut wc = Wildcard::default();
        wc.initialize(&mut ctx, &element(&[("table", "users"), ("as", "u")]))
            .unwrap();
        assert_eq!(wc.generate().unwrap(), "`u`.`id`, `u`.`email`");
        assert_eq!(wc.generate_query().unwrap(), wc.generate().unwrap());
    }

    #[test]
    fn test_expansion_without_alias() {
        let db = db();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        let mut wc = Wildcard::default();
        wc.initialize(&mut ctx, &element(&[("table", "users")])).unwrap();
        assert_eq!(wc.generate().unwrap(), "`users`.`id`, `users`.`email`");
    }

    #[test]
    fn test_unknown_or_missing_table() {
        let db = db();
        let mut ctx = DirectiveContext::new("S", &db, Dialect::MySQL);
        assert!(matches!(
            Wildcard::default().initialize(&mut ctx, &element(&[("table", "nope")])),
            Err(DirectiveError::UnknownTable { .. })
        ));
        assert!(matches!(
            Wildcard::default().initialize(&mut ctx, &element(&[])),
            Err(DirectiveError::MissingAttribute { .. })
        ));
    }
}
