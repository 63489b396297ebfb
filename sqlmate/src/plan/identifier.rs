// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Identifier validation
//!
//! Table and column names are the only request text interpolated into SQL,
//! so every one of them has to match an allow-list pattern first.

use super::error::{CompileError, CompileResult};
use crate::config::bare_name;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid name pattern"));

static TABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)?$").expect("valid table pattern")
});

/// Accepts `table` or `schema.table`
pub fn validate_table(table: &str) -> CompileResult<()> {
    if TABLE_PATTERN.is_match(table) {
        Ok(())
    } else {
        Err(CompileError::invalid_identifier(format!("table name '{}'", table)))
    }
}

pub fn validate_column(column: &str) -> CompileResult<()> {
    if NAME_PATTERN.is_match(column) {
        Ok(())
    } else {
        Err(CompileError::invalid_identifier(format!("column name '{}'", column)))
    }
}

/// Physical name of a user's derived table: `<prefix><username>_<table>`
pub fn user_table_name(prefix: &str, username: &str, table: &str) -> CompileResult<String> {
    if !NAME_PATTERN.is_match(username) {
        return Err(CompileError::invalid_identifier(format!("username '{}'", username)));
    }
    if !NAME_PATTERN.is_match(table) {
        return Err(CompileError::invalid_identifier(format!("table name '{}'", table)));
    }
    Ok(format!("{}{}_{}", prefix, username, table))
}

/// Fails unless `table` is a valid identifier carrying the ownership prefix
pub fn ensure_user_table(prefix: &str, table: &str) -> CompileResult<()> {
    validate_table(table)?;
    if bare_name(table).starts_with(prefix) {
        Ok(())
    } else {
        Err(CompileError::invalid_identifier(format!(
            "table '{}' is not a user table",
            table
        )))
    }
}

/// Fails unless `table` belongs to `username`
pub fn ensure_owned_by(prefix: &str, username: &str, table: &str) -> CompileResult<()> {
    ensure_user_table(prefix, table)?;
    if !NAME_PATTERN.is_match(username) {
        return Err(CompileError::invalid_identifier(format!("username '{}'", username)));
    }
    let owner_prefix = format!("{}{}_", prefix, username);
    if bare_name(table).starts_with(&owner_prefix) {
        Ok(())
    } else {
        Err(CompileError::invalid_identifier(format!(
            "table '{}' does not belong to {}",
            table, username
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pattern() {
        assert!(validate_table("orders").is_ok());
        assert!(validate_table("sales.orders").is_ok());
        assert!(validate_table("orders; DROP TABLE x").is_err());
        assert!(validate_table("a.b.c").is_err());
        assert!(validate_table("").is_err());
    }

    #[test]
    fn test_column_pattern() {
        assert!(validate_column("customer_id").is_ok());
        assert!(validate_column("orders.id").is_err());
        assert!(validate_column("id)--").is_err());
    }

    #[test]
    fn test_user_table_name() {
        assert_eq!(user_table_name("u_", "alice", "report").unwrap(), "u_alice_report");
        assert!(user_table_name("u_", "alice bob", "report").is_err());
        assert!(user_table_name("u_", "alice", "re-port").is_err());
    }

    #[test]
    fn test_ownership() {
        assert!(ensure_user_table("u_", "u_alice_report").is_ok());
        assert!(ensure_user_table("u_", "sqlmate.u_alice_report").is_ok());
        assert!(matches!(
            ensure_user_table("u_", "orders"),
            Err(CompileError::InvalidIdentifier(_))
        ));

        assert!(ensure_owned_by("u_", "alice", "u_alice_report").is_ok());
        assert!(ensure_owned_by("u_", "bob", "u_alice_report").is_err());
    }
}
