// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Service configuration
//!
//! Controls which tables are introspected into the schema graph, how table
//! keys are qualified, where the schema manifest is written and how the
//! compilers render SQL.

mod env;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Schemas that never contribute tables to the shared graph
pub const SYSTEM_SCHEMAS: &[&str] = &["pg_catalog", "information_schema"];

/// Default schema name for PostgreSQL
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Backing database flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(alias = "mariadb")]
    Mysql,
    #[serde(alias = "postgresql")]
    Postgres,
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::Mysql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            other => Err(ConfigError::InvalidValue {
                key: "dialect".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Which schemas are introspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaScope {
    /// One named schema (MySQL: the database itself)
    Single(String),
    /// Every non-system schema, written as `*`
    All,
}

impl From<String> for SchemaScope {
    fn from(value: String) -> Self {
        if value.trim() == "*" {
            SchemaScope::All
        } else {
            SchemaScope::Single(value.trim().to_string())
        }
    }
}

impl From<SchemaScope> for String {
    fn from(scope: SchemaScope) -> Self {
        scope.to_string()
    }
}

impl fmt::Display for SchemaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaScope::Single(name) => write!(f, "{}", name),
            SchemaScope::All => write!(f, "*"),
        }
    }
}

/// How literal values reach the compiled statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamStyle {
    /// `:p1`, `:p2`, ... placeholders with a parallel parameter list
    Named,
    /// Literals interpolated with canonical-type-aware quoting
    Inline,
}

impl FromStr for ParamStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "named" => Ok(ParamStyle::Named),
            "inline" => Ok(ParamStyle::Inline),
            other => Err(ConfigError::InvalidValue {
                key: "param_style".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// How JOINs are discovered for queries touching more than two tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Grow one connected join tree; every table is joined at most once
    Tree,
    /// One anchor-to-table path per table, appended as found. Intermediate
    /// hops shared by two paths are emitted twice.
    AnchorPairwise,
}

impl FromStr for JoinStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tree" => Ok(JoinStrategy::Tree),
            "anchor_pairwise" | "pairwise" => Ok(JoinStrategy::AnchorPairwise),
            other => Err(ConfigError::InvalidValue {
                key: "join_strategy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlMateConfig {
    /// Database flavor (`DB_TYPE`)
    pub dialect: Dialect,

    /// Introspected schema or `*` (`DB_SCHEMA`)
    pub schema: SchemaScope,

    /// If non-empty, only tables in these schemas are listed in the manifest
    pub allowed_schemas: Vec<String>,

    /// Tables hidden from the manifest, bare or schema-qualified. They still
    /// carry joins.
    pub blocked_tables: Vec<String>,

    /// Directory that receives `db_schema.json` on startup
    pub schema_dir: Option<PathBuf>,

    /// Schema holding per-user derived tables
    pub user_schema: String,

    /// Bare-name prefix marking a per-user derived table
    pub user_table_prefix: String,

    pub param_style: ParamStyle,

    pub join_strategy: JoinStrategy,
}

impl Default for SqlMateConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Mysql,
            schema: SchemaScope::Single(DEFAULT_SCHEMA.to_string()),
            allowed_schemas: Vec::new(),
            blocked_tables: Vec::new(),
            schema_dir: None,
            user_schema: "sqlmate".to_string(),
            user_table_prefix: "u_".to_string(),
            param_style: ParamStyle::Named,
            join_strategy: JoinStrategy::Tree,
        }
    }
}

impl SqlMateConfig {
    /// PostgreSQL configuration scoped to one schema
    pub fn postgres(schema: &str) -> Self {
        Self {
            dialect: Dialect::Postgres,
            schema: SchemaScope::from(schema.to_string()),
            ..Self::default()
        }
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> ConfigResult<Self> {
        env::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        env::from_lookup(lookup)
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whether graph keys carry a schema qualifier
    pub fn qualifies_table_keys(&self) -> bool {
        self.dialect == Dialect::Postgres && self.schema != SchemaScope::Single(DEFAULT_SCHEMA.to_string())
    }

    /// Graph key for a table reported in `schema`
    ///
    /// Tables in the user schema always use their bare name, matching the
    /// name handed to `add_table` after a derived table is created.
    pub fn table_key(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) if self.qualifies_table_keys() && schema != self.user_schema => {
                format!("{}.{}", schema, table)
            }
            _ => table.to_string(),
        }
    }

    pub fn is_system_schema(&self, schema: &str) -> bool {
        SYSTEM_SCHEMAS.contains(&schema)
    }

    pub fn is_user_table(&self, table: &str) -> bool {
        bare_name(table).starts_with(&self.user_table_prefix)
    }
}

/// Table name without its schema qualifier
pub fn bare_name(table: &str) -> &str {
    table.rsplit('.').next().unwrap_or(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SqlMateConfig::default();
        assert_eq!(config.dialect, Dialect::Mysql);
        assert_eq!(config.param_style, ParamStyle::Named);
        assert_eq!(config.join_strategy, JoinStrategy::Tree);
        assert!(!config.qualifies_table_keys());
        assert_eq!(config.table_key(Some("shop"), "orders"), "orders");
    }

    #[test]
    fn test_postgres_public_is_unqualified() {
        let config = SqlMateConfig::postgres("public");
        assert!(!config.qualifies_table_keys());
        assert_eq!(config.table_key(Some("public"), "orders"), "orders");
    }

    #[test]
    fn test_postgres_custom_schema_is_qualified() {
        let config = SqlMateConfig::postgres("sales");
        assert!(config.qualifies_table_keys());
        assert_eq!(config.table_key(Some("sales"), "orders"), "sales.orders");
        assert_eq!(config.table_key(Some("sqlmate"), "u_bob_t"), "u_bob_t");
        assert_eq!(config.table_key(None, "orders"), "orders");

        let all = SqlMateConfig::postgres("*");
        assert_eq!(all.schema, SchemaScope::All);
        assert!(all.qualifies_table_keys());
    }

    #[test]
    fn test_user_table_detection() {
        let config = SqlMateConfig::default();
        assert!(config.is_user_table("u_alice_report"));
        assert!(config.is_user_table("sqlmate.u_alice_report"));
        assert!(!config.is_user_table("users"));
        assert_eq!(bare_name("sales.orders"), "orders");
        assert_eq!(bare_name("orders"), "orders");
    }

    #[test]
    fn test_json_roundtrip_uses_defaults() {
        let config: SqlMateConfig =
            serde_json::from_str(r#"{"dialect": "postgresql", "schema": "*"}"#).unwrap();
        assert_eq!(config.dialect, Dialect::Postgres);
        assert_eq!(config.schema, SchemaScope::All);
        assert_eq!(config.user_table_prefix, "u_");

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains(r#""schema":"*""#));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert!("oracle".parse::<Dialect>().is_err());
        assert_eq!("inline".parse::<ParamStyle>().unwrap(), ParamStyle::Inline);
        assert_eq!(
            "anchor_pairwise".parse::<JoinStrategy>().unwrap(),
            JoinStrategy::AnchorPairwise
        );
    }
}
