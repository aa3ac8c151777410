// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqlforge
//!
//! This crate provides common testing components including:
//! - A scripted mock connection
//! - Schema-specific test helpers and assertions
//! - Test fixtures and sample statement documents

pub mod assertions;
pub mod fixtures;
pub mod mock_connection;

// Re-exports for convenience
pub use assertions::SchemaAssertions;
pub use fixtures::{RawColumnFixtures, STANDARD_DATABASE, SchemaFixtures, TemplateFixtures};
pub use mock_connection::{MockConnection, MockConnectionBuilder, mysql_queries, row};
