// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Introspection scope filter

use crate::config::{bare_name, Dialect, SchemaScope, SqlMateConfig, DEFAULT_SCHEMA};

/// Decides which introspected tables are in scope
///
/// Scope (`admits`) governs the schema graph: user tables, system schemas,
/// the user schema and schemas outside the configured scope never join.
/// Visibility (`admits_key`) additionally applies the blocked-table and
/// allow-list settings, and only governs what the manifest shows. A blocked
/// junction table still carries joins between the tables around it.
#[derive(Debug, Clone, Copy)]
pub struct TableFilter<'a> {
    config: &'a SqlMateConfig,
}

impl<'a> TableFilter<'a> {
    pub fn new(config: &'a SqlMateConfig) -> Self {
        Self { config }
    }

    /// Whether `table` reported in `schema` is part of the shared graph
    pub fn admits(&self, schema: Option<&str>, table: &str) -> bool {
        if self.config.is_user_table(table) {
            return false;
        }

        match schema {
            Some(schema) => {
                !self.config.is_system_schema(schema)
                    && schema != self.config.user_schema
                    && self.in_scope(schema)
            }
            None => true,
        }
    }

    /// Whether a graph key is listed in the manifest
    pub fn admits_key(&self, key: &str) -> bool {
        if self.config.is_user_table(key) {
            return false;
        }

        let bare = bare_name(key);
        if self
            .config
            .blocked_tables
            .iter()
            .any(|blocked| blocked == bare || blocked == key)
        {
            return false;
        }

        if !self.config.allowed_schemas.is_empty() {
            let schema_part = match key.rsplit_once('.') {
                Some((schema, _)) => schema,
                None => DEFAULT_SCHEMA,
            };
            if !self.config.allowed_schemas.iter().any(|s| s == schema_part) {
                return false;
            }
        }

        true
    }

    /// MySQL introspection is already scoped to one database
    fn in_scope(&self, schema: &str) -> bool {
        match (&self.config.dialect, &self.config.schema) {
            (Dialect::Mysql, _) => true,
            (Dialect::Postgres, SchemaScope::All) => true,
            (Dialect::Postgres, SchemaScope::Single(name)) => name == schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_tables_are_private() {
        let config = SqlMateConfig::default();
        let filter = TableFilter::new(&config);
        assert!(!filter.admits(None, "u_alice_report"));
        assert!(!filter.admits(Some("sqlmate"), "user_tables"));
        assert!(filter.admits(None, "users"));
    }

    #[test]
    fn test_system_schemas_and_scope() {
        let config = SqlMateConfig::postgres("sales");
        let filter = TableFilter::new(&config);
        assert!(!filter.admits(Some("pg_catalog"), "pg_class"));
        assert!(!filter.admits(Some("public"), "orders"));
        assert!(filter.admits(Some("sales"), "orders"));

        let all = SqlMateConfig::postgres("*");
        let filter = TableFilter::new(&all);
        assert!(filter.admits(Some("public"), "orders"));
        assert!(filter.admits(Some("sales"), "orders"));
        assert!(!filter.admits(Some("information_schema"), "tables"));
    }

    #[test]
    fn test_blocked_tables_stay_in_scope() {
        let mut config = SqlMateConfig::postgres("*");
        config.blocked_tables = vec!["migrations".to_string(), "sales.audit".to_string()];
        let filter = TableFilter::new(&config);

        assert!(filter.admits(Some("public"), "migrations"));
        assert!(!filter.admits_key("public.migrations"));
        assert!(!filter.admits_key("sales.migrations"));
        assert!(!filter.admits_key("sales.audit"));
        assert!(filter.admits_key("ops.audit"));
    }

    #[test]
    fn test_allowed_schemas() {
        let mut config = SqlMateConfig::postgres("*");
        config.allowed_schemas = vec!["analytics".to_string()];
        let filter = TableFilter::new(&config);

        assert!(filter.admits(Some("sales"), "orders"));
        assert!(filter.admits_key("analytics.events"));
        assert!(!filter.admits_key("sales.orders"));

        let mut mysql = SqlMateConfig::default();
        mysql.allowed_schemas = vec!["public".to_string()];
        assert!(TableFilter::new(&mysql).admits_key("orders"));
    }
}
