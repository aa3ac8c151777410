// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Connection seam
//!
//! Drivers talk to the database only through [`Connection`]. Each call is one
//! round trip whose results are fully consumed before it returns, so the next
//! query on the same connection never overlaps an open result set.

use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{CatalogError, CatalogResult};
use crate::scan::RawColumn;

/// A live database connection
#[async_trait]
pub trait Connection: Send {
    /// Run a query with positional text parameters and collect every row
    ///
    /// Every selected column must be textual; drivers cast catalog columns to
    /// character types in their introspection queries.
    async fn fetch_rows(&mut self, query: &str, params: &[&str]) -> CatalogResult<Vec<Row>>;

    /// Report the result columns a query produces
    async fn describe(&mut self, query: &str) -> CatalogResult<Vec<RawColumn>>;
}

/// One fetched row, every value as optional text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    values: Vec<Option<String>>,
}

impl Row {
    /// Create a row from its values
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw access, `None` for SQL NULL or a missing index
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// A non-NULL text value
    pub fn text(&self, idx: usize, what: &str) -> CatalogResult<&str> {
        self.get(idx)
            .ok_or_else(|| CatalogError::inconsistency(format!("unexpected NULL {}", what)))
    }

    /// A non-NULL value parsed into `T`
    pub fn parse<T: FromStr>(&self, idx: usize, what: &str) -> CatalogResult<T> {
        let text = self.text(idx, what)?;
        text.trim().parse().map_err(|_| {
            CatalogError::inconsistency(format!("malformed {}: {:?}", what, text))
        })
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(|v| v.map(Into::into)).collect())
    }
}

/// Check that `current` directly follows `previous` in a 1-based sequence
///
/// Ordinal sequences from the catalog (index column order, foreign key
/// column order) must start at 1 and have no gaps.
pub fn expect_next_ordinal(previous: u32, current: u32, what: &str) -> CatalogResult<()> {
    if current != previous + 1 {
        return Err(CatalogError::inconsistency(format!(
            "bad {}, previous is {}, current is {}",
            what, previous, current
        )));
    }
    Ok(())
}
