// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Generator run
//!
//! One run: look up the driver, validate the type map, load the schema,
//! build and compile every document, then expose the selected tables. Each
//! step is awaited before the next one starts. The first error ends the run.

use serde::Serialize;
use sqlforge_catalog::{load_schema, Connection, DriverRegistry};
use sqlforge_directive::{build_document, DirectiveRegistry};
use sqlforge_ir::TableInfo;
use tracing::{debug, info};

use crate::compiler::{CompiledStatement, StatementCompiler};
use crate::config::GeneratorConfig;
use crate::error::{CompileError, CompileResult};
use crate::type_map::TypeMap;

/// A statement document to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    /// Document name used in errors and output, usually its file name
    pub name: String,
    /// Markup text
    pub text: String,
}

impl TemplateDocument {
    /// Create a document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Compiled statements of one document, in document order
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput {
    pub name: String,
    pub statements: Vec<CompiledStatement>,
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorOutput {
    /// Driver that produced the schema
    pub driver: String,
    /// Tables selected by the whitelist or blacklist, in extraction order
    pub tables: Vec<TableInfo>,
    /// Validated type map, if one was configured
    pub type_map: Option<TypeMap>,
    /// Compiled documents, in input order
    pub documents: Vec<DocumentOutput>,
}

/// Drives schema loading and statement compilation
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    drivers: DriverRegistry,
    directives: DirectiveRegistry,
}

impl Generator {
    /// Create a generator with the builtin drivers and directives
    pub fn new(config: GeneratorConfig) -> CompileResult<Self> {
        Self::with_registries(
            config,
            DriverRegistry::with_builtins(),
            DirectiveRegistry::with_builtins(),
        )
    }

    /// Create a generator with caller-populated registries
    pub fn with_registries(
        config: GeneratorConfig,
        drivers: DriverRegistry,
        directives: DirectiveRegistry,
    ) -> CompileResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            drivers,
            directives,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run against a live connection
    pub async fn run(
        &self,
        conn: &mut dyn Connection,
        documents: &[TemplateDocument],
    ) -> CompileResult<GeneratorOutput> {
        let driver = self.drivers.get(&self.config.driver)?;

        let type_map = if self.config.type_map.is_empty() {
            None
        } else {
            Some(TypeMap::build(&self.config.type_map, driver.data_types())?)
        };

        let db = load_schema(driver.as_ref(), conn).await?;
        info!("Loaded {} tables", db.len());

        let compiler = StatementCompiler::new(driver.as_ref());
        let mut outputs = Vec::with_capacity(documents.len());
        for doc in documents {
            let templates = build_document(&doc.text, &self.directives, &db, driver.dialect())
                .map_err(|source| CompileError::Document {
                    document: doc.name.clone(),
                    source,
                })?;
            debug!("Compiling {} statements from '{}'", templates.len(), doc.name);

            let statements = compiler
                .compile_document(conn, &doc.name, templates)
                .await
                .into_iter()
                .collect::<CompileResult<Vec<_>>>()?;
            outputs.push(DocumentOutput {
                name: doc.name.clone(),
                statements,
            });
        }

        let tables = db
            .filtered(|table| self.config.table_selected(&table.name))
            .tables()
            .to_vec();
        info!(
            "Compiled {} documents, exposing {} of {} tables",
            outputs.len(),
            tables.len(),
            db.len()
        );

        Ok(GeneratorOutput {
            driver: driver.name().to_string(),
            tables,
            type_map,
            documents: outputs,
        })
    }
}
