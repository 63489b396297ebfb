// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Environment variable loading for SqlMateConfig

use super::{ConfigResult, SchemaScope, SqlMateConfig};
use std::path::PathBuf;

pub(super) const DB_TYPE: &str = "DB_TYPE";
pub(super) const DB_SCHEMA: &str = "DB_SCHEMA";
pub(super) const ALLOWED_SCHEMAS: &str = "SQLMATE_ALLOWED_SCHEMAS";
pub(super) const BLOCKED_TABLES: &str = "SQLMATE_BLOCKED_TABLES";
pub(super) const SCHEMA_DIR: &str = "SQLMATE_SCHEMA_DIR";
pub(super) const USER_SCHEMA: &str = "SQLMATE_USER_SCHEMA";
pub(super) const PARAM_STYLE: &str = "SQLMATE_PARAM_STYLE";
pub(super) const JOIN_STRATEGY: &str = "SQLMATE_JOIN_STRATEGY";

pub(super) fn from_lookup<F>(lookup: F) -> ConfigResult<SqlMateConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = SqlMateConfig::default();

    if let Some(value) = non_empty(lookup(DB_TYPE)) {
        config.dialect = value.parse()?;
    }
    if let Some(value) = non_empty(lookup(DB_SCHEMA)) {
        config.schema = SchemaScope::from(value);
    }
    if let Some(value) = lookup(ALLOWED_SCHEMAS) {
        config.allowed_schemas = split_list(&value);
    }
    if let Some(value) = lookup(BLOCKED_TABLES) {
        config.blocked_tables = split_list(&value);
    }
    if let Some(value) = non_empty(lookup(SCHEMA_DIR)) {
        config.schema_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = non_empty(lookup(USER_SCHEMA)) {
        config.user_schema = value;
    }
    if let Some(value) = non_empty(lookup(PARAM_STYLE)) {
        config.param_style = value.parse()?;
    }
    if let Some(value) = non_empty(lookup(JOIN_STRATEGY)) {
        config.join_strategy = value.parse()?;
    }

    log::debug!(
        "Loaded config: dialect={:?} schema={} allowed={:?} blocked={:?}",
        config.dialect,
        config.schema,
        config.allowed_schemas,
        config.blocked_tables
    );

    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated list; blank entries dropped
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
