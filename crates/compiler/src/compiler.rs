// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement compiler
//!
//! Compiling a SELECT statement:
//! 1. assemble the probe text from every directive's `generate_query`;
//! 2. run the probe once and classify its result columns with the driver;
//! 3. let every directive post-process names and types, in document order;
//! 4. assemble the final text from every directive's `generate`.
//!
//! Other statement kinds produce no result columns and are never probed.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use sqlforge_catalog::{Connection, Driver};
use sqlforge_directive::{ResultColumnType, StatementTemplate};
use sqlforge_ir::ColumnInfo;
use tracing::debug;

use crate::error::{CompileError, CompileResult, StatementFailure};

/// Statement kind, from the first keyword of the final text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Replace,
    Other,
}

impl StatementKind {
    /// Classify by first keyword, skipping whitespace, opening parentheses
    /// and leading comments
    pub fn detect(text: &str) -> Self {
        let keyword: String = skip_leading_noise(text)
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();

        match keyword.to_ascii_uppercase().as_str() {
            "SELECT" | "WITH" => StatementKind::Select,
            "INSERT" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            "REPLACE" => StatementKind::Replace,
            _ => StatementKind::Other,
        }
    }
}

fn skip_leading_noise(mut text: &str) -> &str {
    loop {
        text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '(');
        if let Some(rest) = text.strip_prefix("--") {
            text = rest.split_once('\n').map(|(_, after)| after).unwrap_or("");
        } else if let Some(rest) = text.strip_prefix("/*") {
            text = rest.split_once("*/").map(|(_, after)| after).unwrap_or("");
        } else {
            return text;
        }
    }
}

/// A compiled statement
#[derive(Debug, Clone, Serialize)]
pub struct CompiledStatement {
    /// The template this statement was compiled from
    #[serde(rename = "statement", serialize_with = "serialize_template")]
    pub template: Arc<StatementTemplate>,
    /// Statement kind
    pub kind: StatementKind,
    /// Final query text
    pub text: String,
    /// Probe query text, `None` for statements that are not probed
    pub probe: Option<String>,
    /// Final result columns
    pub columns: Vec<ColumnInfo>,
}

impl CompiledStatement {
    /// Statement name
    pub fn name(&self) -> &str {
        self.template.name()
    }
}

#[derive(Serialize)]
struct TemplateView<'a> {
    name: &'a str,
    hints: &'a std::collections::BTreeMap<String, String>,
    args: &'a [sqlforge_directive::Argument],
}

fn serialize_template<S: Serializer>(
    template: &Arc<StatementTemplate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    TemplateView {
        name: template.name(),
        hints: template.hints(),
        args: template.arguments(),
    }
    .serialize(serializer)
}

/// Compiles statement templates against one driver
pub struct StatementCompiler<'a> {
    driver: &'a dyn Driver,
}

impl<'a> StatementCompiler<'a> {
    /// Create a compiler for a driver
    pub fn new(driver: &'a dyn Driver) -> Self {
        Self { driver }
    }

    /// Compile one statement
    ///
    /// # Errors
    ///
    /// Returns `CompileError::Statement` naming `document`, the statement and
    /// the probe query (once assembled).
    pub async fn compile(
        &self,
        conn: &mut dyn Connection,
        document: &str,
        template: Arc<StatementTemplate>,
    ) -> CompileResult<CompiledStatement> {
        let fail = |query: Option<&str>, source: StatementFailure| CompileError::Statement {
            document: document.to_string(),
            statement: template.name().to_string(),
            query: query.map(str::to_string),
            source,
        };

        let text = template.generate().map_err(|e| fail(None, e.into()))?;
        let kind = StatementKind::detect(&text);
        if kind != StatementKind::Select {
            debug!("Statement '{}' is {:?}, not probed", template.name(), kind);
            return Ok(CompiledStatement {
                template,
                kind,
                text,
                probe: None,
                columns: Vec::new(),
            });
        }

        let probe = template.generate_query().map_err(|e| fail(None, e.into()))?;
        debug!("Probing statement '{}': {}", template.name(), probe);
        let discovered = self
            .driver
            .extract_query_result_columns(conn, &probe)
            .await
            .map_err(|e| fail(Some(&probe), e.into()))?;

        let mut names: Vec<String> = discovered.iter().map(|c| c.name.clone()).collect();
        let mut types: Vec<ResultColumnType> = discovered.iter().map(ResultColumnType::from).collect();
        template
            .process_query_result(&mut names, &mut types)
            .map_err(|e| fail(Some(&probe), e.into()))?;
        if names.len() != types.len() {
            return Err(fail(
                Some(&probe),
                StatementFailure::ResultShape {
                    names: names.len(),
                    types: types.len(),
                },
            ));
        }

        let columns = names
            .into_iter()
            .zip(types)
            .enumerate()
            .map(|(position, (name, ty))| {
                ColumnInfo::new(name, position, ty.data_type).with_nullable(ty.nullable)
            })
            .collect();

        Ok(CompiledStatement {
            template,
            kind,
            text,
            probe: Some(probe),
            columns,
        })
    }

    /// Compile every statement of a document independently, in order
    ///
    /// One statement failing leaves the others' results intact.
    pub async fn compile_document(
        &self,
        conn: &mut dyn Connection,
        document: &str,
        templates: Vec<StatementTemplate>,
    ) -> Vec<CompileResult<CompiledStatement>> {
        let mut results = Vec::with_capacity(templates.len());
        for template in templates {
            results.push(self.compile(conn, document, Arc::new(template)).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(StatementKind::detect("SELECT 1"), StatementKind::Select);
        assert_eq!(StatementKind::detect("\n  select 1"), StatementKind::Select);
        assert_eq!(StatementKind::detect("(SELECT 1) UNION (SELECT 2)"), StatementKind::Select);
        assert_eq!(StatementKind::detect("WITH t AS (SELECT 1) SELECT * FROM t"), StatementKind::Select);
        assert_eq!(StatementKind::detect("-- note\nUPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::detect("/* x */ DELETE FROM t"), StatementKind::Delete);
        assert_eq!(StatementKind::detect("INSERT INTO t VALUES (1)"), StatementKind::Insert);
        assert_eq!(StatementKind::detect("REPLACE INTO t VALUES (1)"), StatementKind::Replace);
        assert_eq!(StatementKind::detect("CALL p()"), StatementKind::Other);
        assert_eq!(StatementKind::detect(""), StatementKind::Other);
    }
}
