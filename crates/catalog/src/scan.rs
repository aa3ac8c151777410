// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Raw column signals
//!
//! A connection reports each result column as a [`RawColumn`]: the low-level
//! scan type the client library decodes into, the type name the server
//! reports, and nullability. Drivers classify these signals into canonical
//! types.
//!
//! Some engines keep the unsigned flag and display length out of their public
//! result metadata. A connection that can recover them anyway fills in
//! [`FieldFlags`]; one that can't leaves it `None`, and classification falls
//! back to the public signals alone.

use std::fmt;

use serde::Serialize;

/// Low-level type a result column decodes into
///
/// Integer and float columns declared `NOT NULL` decode into an exact-width
/// type; nullable ones decode into a wrapper whose width has to be recovered
/// from the database type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScanType {
    Float32,
    Float64,
    NullFloat,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    NullInt,
    NullTime,
    RawBytes,
    Unknown,
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanType::Float32 => "f32",
            ScanType::Float64 => "f64",
            ScanType::NullFloat => "Option<f64>",
            ScanType::Int8 => "i8",
            ScanType::Int16 => "i16",
            ScanType::Int32 => "i32",
            ScanType::Int64 => "i64",
            ScanType::Uint8 => "u8",
            ScanType::Uint16 => "u16",
            ScanType::Uint32 => "u32",
            ScanType::Uint64 => "u64",
            ScanType::NullInt => "Option<i64>",
            ScanType::NullTime => "Option<time>",
            ScanType::RawBytes => "bytes",
            ScanType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Side-channel field attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FieldFlags {
    /// Integer column declared UNSIGNED
    pub unsigned: bool,
    /// Declared display length, when known
    pub length: Option<u32>,
}

/// One result column as reported by a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawColumn {
    /// Column name (alias if one was given)
    pub name: String,
    /// Low-level scan type
    pub scan_type: ScanType,
    /// Type name reported by the database, e.g. `INT`, `VARCHAR`
    pub database_type_name: String,
    /// Nullability, if the connection knows it
    pub nullable: Option<bool>,
    /// Unsigned flag and display length, if recoverable
    pub field: Option<FieldFlags>,
}

impl RawColumn {
    /// Create a new raw column with builder pattern
    pub fn new(
        name: impl Into<String>,
        scan_type: ScanType,
        database_type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scan_type,
            database_type_name: database_type_name.into(),
            nullable: None,
            field: None,
        }
    }

    /// Builder method: set nullability
    pub fn with_nullable(mut self, nullable: Option<bool>) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method: set side-channel flags
    pub fn with_field(mut self, unsigned: bool, length: Option<u32>) -> Self {
        self.field = Some(FieldFlags { unsigned, length });
        self
    }

    /// Unsigned flag, `false` when the side channel is absent
    pub fn is_unsigned(&self) -> bool {
        self.field.map(|f| f.unsigned).unwrap_or(false)
    }

    /// Display length, `None` when the side channel is absent
    pub fn length(&self) -> Option<u32> {
        self.field.and_then(|f| f.length)
    }
}
