// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge - Statement Compiler
//!
//! This crate ties the catalog and directive layers together. It compiles
//! statement templates into final query text plus typed result columns, and
//! drives a whole generator run from a [`GeneratorConfig`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlforge_compiler::{Generator, GeneratorConfig, TemplateDocument};
//!
//! let generator = Generator::new(GeneratorConfig::from_json(&config_text)?)?;
//! let output = generator
//!     .run(&mut conn, &[TemplateDocument::new("users.xml", text)])
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&output)?);
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod generator;
pub mod type_map;

pub use compiler::{CompiledStatement, StatementCompiler, StatementKind};
pub use config::{ConfigError, GeneratorConfig, DEFAULT_DRIVER};
pub use error::{CompileError, CompileResult, StatementFailure};
pub use generator::{DocumentOutput, Generator, GeneratorOutput, TemplateDocument};
pub use type_map::{TypeMap, TypeMapError};
