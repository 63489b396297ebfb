// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL-flavored display types for the schema manifest

/// Map a raw vendor type to the manifest's display vocabulary.
///
/// Unmapped names fall back to the upper-cased raw name.
pub fn display_type(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();

    let mapped = match upper.as_str() {
        "INT" | "INTEGER" | "BIGINT" | "SMALLINT" | "TINYINT" | "SERIAL" => "INT",
        "VARCHAR" | "CHAR" | "TEXT" | "CHARACTER VARYING" => "VARCHAR(255)",
        "DECIMAL" | "NUMERIC" | "DOUBLE PRECISION" | "REAL" => "DECIMAL(10,2)",
        "FLOAT" | "DOUBLE" => "FLOAT",
        "DATETIME"
        | "TIMESTAMP"
        | "TIMESTAMP WITHOUT TIME ZONE"
        | "TIMESTAMP WITH TIME ZONE" => "TIMESTAMP",
        "DATE" => "DATE",
        "BOOLEAN" | "BOOL" => "BOOLEAN",
        _ => return upper,
    };

    mapped.to_string()
}
