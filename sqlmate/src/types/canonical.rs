// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Raw vendor type name normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical column kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanonicalType {
    Int,
    Float,
    Str,
    Date,
    Bool,
    /// Unrecognized vendor type, or a column that was never registered
    Unknown,
}

const INT_NAMES: &[&str] = &[
    "int",
    "integer",
    "bigint",
    "smallint",
    "tinyint",
    "mediumint",
    "serial",
    "bigserial",
    "smallserial",
    "int2",
    "int4",
    "int8",
];

const FLOAT_NAMES: &[&str] = &[
    "float",
    "double",
    "decimal",
    "numeric",
    "double precision",
    "real",
    "float4",
    "float8",
];

const STR_NAMES: &[&str] = &[
    "str",
    "varchar",
    "character varying",
    "char",
    "text",
    "tinytext",
    "mediumtext",
    "longtext",
];

const DATE_NAMES: &[&str] = &[
    "datetime",
    "date",
    "timestamp",
    "timestamp without time zone",
    "timestamp with time zone",
];

const BOOL_NAMES: &[&str] = &["boolean", "bool"];

/// Normalize a raw vendor type name into its canonical kind.
///
/// Matching is case-insensitive: exact names first, then the `decimal*`,
/// `numeric*`, `varchar*` and `character*` prefixes. Anything else maps to
/// [`CanonicalType::Unknown`].
pub fn normalize(raw: &str) -> CanonicalType {
    let name = raw.trim().to_lowercase();
    let name = name.as_str();

    if INT_NAMES.contains(&name) {
        CanonicalType::Int
    } else if FLOAT_NAMES.contains(&name)
        || name.starts_with("decimal")
        || name.starts_with("numeric")
    {
        CanonicalType::Float
    } else if STR_NAMES.contains(&name)
        || name.starts_with("varchar")
        || name.starts_with("character")
    {
        CanonicalType::Str
    } else if DATE_NAMES.contains(&name) {
        CanonicalType::Date
    } else if BOOL_NAMES.contains(&name) {
        CanonicalType::Bool
    } else {
        CanonicalType::Unknown
    }
}

impl CanonicalType {
    /// Lookup-contract name; `Unknown` is the empty string
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::Int => "INT",
            CanonicalType::Float => "FLOAT",
            CanonicalType::Str => "STR",
            CanonicalType::Date => "DATE",
            CanonicalType::Bool => "BOOL",
            CanonicalType::Unknown => "",
        }
    }

    /// Whether inline literals of this kind are rendered between quotes
    pub fn is_quoted(&self) -> bool {
        matches!(self, CanonicalType::Str | CanonicalType::Date)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CanonicalType::Int | CanonicalType::Float)
    }

    pub fn is_unknown(&self) -> bool {
        *self == CanonicalType::Unknown
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalType::Unknown => write!(f, "UNKNOWN"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}
