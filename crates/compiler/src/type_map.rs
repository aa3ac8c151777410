// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Canonical type mapping
//!
//! Binds canonical type names to target types for downstream code emission.
//! A mapping must cover every canonical type the active driver can produce.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlforge_ir::{CanonicalType, UnknownCanonicalType};

/// Errors raised while building a type map
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeMapError {
    /// A key is not a canonical type name
    #[error(transparent)]
    UnknownType(#[from] UnknownCanonicalType),

    /// The driver can produce types the mapping does not cover
    #[error("Type map does not cover {}", join(.missing))]
    Incomplete { missing: Vec<CanonicalType> },
}

fn join(types: &[CanonicalType]) -> String {
    types
        .iter()
        .map(CanonicalType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated canonical type to target type mapping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: BTreeMap<CanonicalType, String>,
}

impl TypeMap {
    /// Build from raw name pairs and check coverage of `data_types`
    ///
    /// # Errors
    ///
    /// Returns `TypeMapError::UnknownType` for a key outside the canonical
    /// set and `TypeMapError::Incomplete` if a producible type is unmapped.
    pub fn build(
        raw: &BTreeMap<String, String>,
        data_types: &[CanonicalType],
    ) -> Result<Self, TypeMapError> {
        let entries = raw
            .iter()
            .map(|(name, target)| Ok((name.parse::<CanonicalType>()?, target.clone())))
            .collect::<Result<BTreeMap<_, _>, UnknownCanonicalType>>()?;

        let missing: Vec<CanonicalType> = data_types
            .iter()
            .copied()
            .filter(|ty| !entries.contains_key(ty))
            .collect();
        if !missing.is_empty() {
            return Err(TypeMapError::Incomplete { missing });
        }

        Ok(Self { entries })
    }

    /// Target type for a canonical type
    pub fn get(&self, ty: CanonicalType) -> Option<&str> {
        self.entries.get(&ty).map(String::as_str)
    }

    /// Number of mapped types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
