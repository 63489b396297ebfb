// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Literal values and canonical-type coercion

use super::error::{CompileError, CompileResult};
use crate::types::CanonicalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// -2^63, exactly representable
const I64_LOWER: f64 = i64::MIN as f64;
/// 2^63, one past `i64::MAX`
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Literal supplied by the caller, as it arrives in request JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Coerce the literal to the canonical type of the column it is
    /// compared with or assigned to.
    ///
    /// STR and DATE accept anything (stringified). UNKNOWN passes values
    /// through untouched.
    pub fn coerce(&self, column: &str, expected: CanonicalType) -> CompileResult<SqlValue> {
        let invalid = || CompileError::InvalidLiteral {
            column: column.to_string(),
            expected,
            value: self.to_string(),
        };

        let coerced = match (expected, self) {
            (_, SqlValue::Null) => SqlValue::Null,
            (CanonicalType::Unknown, value) => value.clone(),

            (CanonicalType::Str | CanonicalType::Date, SqlValue::Text(s)) => SqlValue::Text(s.clone()),
            (CanonicalType::Str | CanonicalType::Date, value) => SqlValue::Text(value.to_string()),

            (CanonicalType::Int, SqlValue::Int(i)) => SqlValue::Int(*i),
            // whole floats only, and only inside i64's range so the cast is exact
            (CanonicalType::Int, SqlValue::Float(f))
                if f.fract() == 0.0 && *f >= I64_LOWER && *f < I64_UPPER =>
            {
                SqlValue::Int(*f as i64)
            }
            (CanonicalType::Int, SqlValue::Text(s)) => {
                SqlValue::Int(s.trim().parse::<i64>().map_err(|_| invalid())?)
            }

            (CanonicalType::Float, SqlValue::Int(i)) => SqlValue::Int(*i),
            (CanonicalType::Float, SqlValue::Float(f)) if f.is_finite() => SqlValue::Float(*f),
            (CanonicalType::Float, SqlValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => SqlValue::Float(f),
                _ => return Err(invalid()),
            },

            (CanonicalType::Bool, SqlValue::Bool(b)) => SqlValue::Bool(*b),
            (CanonicalType::Bool, SqlValue::Int(0)) => SqlValue::Bool(false),
            (CanonicalType::Bool, SqlValue::Int(1)) => SqlValue::Bool(true),
            (CanonicalType::Bool, SqlValue::Text(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "t" | "1" => SqlValue::Bool(true),
                "false" | "f" | "0" => SqlValue::Bool(false),
                _ => return Err(invalid()),
            },

            _ => return Err(invalid()),
        };

        Ok(coerced)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<SqlValue> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Null,
                SqlValue::Bool(true),
                SqlValue::Int(3),
                SqlValue::Float(2.5),
                SqlValue::text("x"),
            ]
        );
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(SqlValue::text(" 42 ").coerce("c", CanonicalType::Int).unwrap(), SqlValue::Int(42));
        assert_eq!(SqlValue::Float(7.0).coerce("c", CanonicalType::Int).unwrap(), SqlValue::Int(7));
        assert!(SqlValue::Float(7.5).coerce("c", CanonicalType::Int).is_err());
        assert!(SqlValue::text("1 OR 1=1").coerce("c", CanonicalType::Int).is_err());
        assert!(SqlValue::Bool(true).coerce("c", CanonicalType::Int).is_err());
    }

    #[test]
    fn test_out_of_range_float_is_rejected_for_int() {
        for value in [1e30, -1e30, 9.223372036854775807e18, f64::INFINITY, f64::NAN] {
            let err = SqlValue::Float(value).coerce("t.c", CanonicalType::Int).unwrap_err();
            assert!(matches!(err, CompileError::InvalidLiteral { .. }), "{}", value);
        }
        assert_eq!(
            SqlValue::Float(-9.223372036854775808e18).coerce("t.c", CanonicalType::Int).unwrap(),
            SqlValue::Int(i64::MIN)
        );
        assert_eq!(
            SqlValue::Float(4503599627370496.0).coerce("t.c", CanonicalType::Int).unwrap(),
            SqlValue::Int(4503599627370496)
        );
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(SqlValue::text("9.99").coerce("c", CanonicalType::Float).unwrap(), SqlValue::Float(9.99));
        assert_eq!(SqlValue::Int(3).coerce("c", CanonicalType::Float).unwrap(), SqlValue::Int(3));
        assert!(SqlValue::text("NaN").coerce("c", CanonicalType::Float).is_err());
    }

    #[test]
    fn test_bool_coercion() {
        assert_eq!(SqlValue::text("TRUE").coerce("c", CanonicalType::Bool).unwrap(), SqlValue::Bool(true));
        assert_eq!(SqlValue::Int(0).coerce("c", CanonicalType::Bool).unwrap(), SqlValue::Bool(false));
        assert!(SqlValue::Int(2).coerce("c", CanonicalType::Bool).is_err());
    }

    #[test]
    fn test_string_and_unknown_coercion() {
        assert_eq!(SqlValue::Int(5).coerce("c", CanonicalType::Str).unwrap(), SqlValue::text("5"));
        assert_eq!(
            SqlValue::text("2024-01-01").coerce("c", CanonicalType::Date).unwrap(),
            SqlValue::text("2024-01-01")
        );
        assert_eq!(SqlValue::Float(1.5).coerce("c", CanonicalType::Unknown).unwrap(), SqlValue::Float(1.5));
        assert_eq!(SqlValue::Null.coerce("c", CanonicalType::Int).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_invalid_literal_names_column() {
        let err = SqlValue::text("abc").coerce("orders.total", CanonicalType::Float).unwrap_err();
        assert_eq!(err.to_string(), "Invalid literal for orders.total: expected FLOAT, got abc");
    }
}
