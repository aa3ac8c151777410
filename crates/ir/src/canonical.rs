// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Canonical data types
//!
//! Every driver reduces the low-level type signals of its engine to one of
//! the members of [`CanonicalType`]. Downstream code generation binds these
//! names to concrete language types through a separately configured mapping,
//! so the set is closed: drivers must never produce anything outside of it.
//!
//! Declared length and precision (e.g. `VARCHAR(255)`, `DECIMAL(10,2)`) are
//! not carried by the canonical type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Engine independent semantic column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalType {
    // Float types
    Float32,
    Float64,

    // Integer types, including bool
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,

    // Temporal types (date, time, datetime, timestamp collapse here)
    Time,

    // String types
    Bit,
    Json,
    String,
}

impl CanonicalType {
    /// Every canonical type, in declaration order
    pub const ALL: [CanonicalType; 15] = [
        CanonicalType::Float32,
        CanonicalType::Float64,
        CanonicalType::Bool,
        CanonicalType::Int8,
        CanonicalType::Uint8,
        CanonicalType::Int16,
        CanonicalType::Uint16,
        CanonicalType::Int32,
        CanonicalType::Uint32,
        CanonicalType::Int64,
        CanonicalType::Uint64,
        CanonicalType::Time,
        CanonicalType::Bit,
        CanonicalType::Json,
        CanonicalType::String,
    ];

    /// The stable name used by type mappings
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::Float32 => "float32",
            CanonicalType::Float64 => "float64",
            CanonicalType::Bool => "bool",
            CanonicalType::Int8 => "int8",
            CanonicalType::Uint8 => "uint8",
            CanonicalType::Int16 => "int16",
            CanonicalType::Uint16 => "uint16",
            CanonicalType::Int32 => "int32",
            CanonicalType::Uint32 => "uint32",
            CanonicalType::Int64 => "int64",
            CanonicalType::Uint64 => "uint64",
            CanonicalType::Time => "time",
            CanonicalType::Bit => "bit",
            CanonicalType::Json => "json",
            CanonicalType::String => "string",
        }
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name is not a member of the canonical type set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown canonical type: '{0}'")]
pub struct UnknownCanonicalType(pub String);

impl FromStr for CanonicalType {
    type Err = UnknownCanonicalType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownCanonicalType(s.to_string()))
    }
}
