// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement Directive Registry
//!
//! This crate turns annotated SQL statement templates into ordered chains of
//! directives. Each directive contributes one fragment to the final query and
//! one, possibly different, fragment to the probe query that discovers the
//! statement's result columns.
//!
//! ## Features
//!
//! - Document parsing with located errors
//! - An explicit, open registry of directive factories keyed by tag
//! - Builtin `replace`, `arg` and `wc` directives
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlforge_directive::{build_document, DirectiveRegistry};
//!
//! let registry = DirectiveRegistry::with_builtins();
//! let statements = build_document(text, &registry, &db, Dialect::MySQL)?;
//! for stmt in &statements {
//!     println!("{}: {}", stmt.name(), stmt.generate()?);
//! }
//! ```

pub mod builtin;
pub mod directive;
pub mod error;
pub mod registry;
pub mod statement;
pub mod template;

pub use directive::{Argument, Directive, DirectiveContext, Literal, ResultColumnType};
pub use error::{DirectiveError, DirectiveResult};
pub use registry::{DirectiveFactory, DirectiveRegistry};
pub use statement::{build_document, StatementTemplate};
pub use template::{parse_document, ElementNode, Position, StatementSource, TemplateNode};
