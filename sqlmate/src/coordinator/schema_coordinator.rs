// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema Coordinator - single entry point for request handlers
//!
//! Owns the schema graph, the introspection collaborator and the
//! configuration. It is built once at service start and shared by handle;
//! nothing here is global state.

use super::error::{SqlMateError, SqlMateResult};
use crate::catalog::{Introspector, SchemaGraph, SchemaManifest};
use crate::config::SqlMateConfig;
use crate::exec::{ExecutionError, SqlExecutor};
use crate::plan::{
    user_table_name, CompiledQuery, CompiledUpdate, QueryCompiler, QueryOptions, QuerySelection,
    UpdateCompiler, UpdateSpec,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result table returned to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// SQL text that produced the rows
    pub query: String,
    pub selection_count: usize,
}

/// Schema Coordinator - wires graph, compilers and executor together
///
/// Compilation only reads the graph and may run from any number of threads.
/// The one write path is [`SchemaCoordinator::register_user_table`].
pub struct SchemaCoordinator {
    config: SqlMateConfig,
    introspector: Arc<dyn Introspector>,
    graph: Arc<SchemaGraph>,
    executor: Option<Arc<dyn SqlExecutor>>,
}

impl SchemaCoordinator {
    /// Build the graph and, when `schema_dir` is configured, write the manifest
    ///
    /// # Arguments
    /// * `config` - Scope, dialect and rendering settings
    /// * `introspector` - Catalog metadata source
    ///
    /// # Returns
    /// * `Ok(SchemaCoordinator)` - Ready to compile requests
    /// * `Err(SqlMateError)` - Introspection failed or the manifest could not
    ///   be written; the service must not start
    pub fn startup(config: SqlMateConfig, introspector: Arc<dyn Introspector>) -> SqlMateResult<Self> {
        log::info!(
            "Starting schema coordinator ({:?}, schema {})",
            config.dialect,
            config.schema
        );
        let graph = SchemaGraph::build(introspector.as_ref(), &config)?;

        let coordinator = Self {
            config,
            introspector,
            graph: Arc::new(graph),
            executor: None,
        };

        if let Some(dir) = coordinator.config.schema_dir.clone() {
            coordinator.write_manifest(&dir)?;
        }

        Ok(coordinator)
    }

    /// Attach the execution collaborator used by `run_query` / `run_update`
    pub fn with_executor(mut self, executor: Arc<dyn SqlExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn graph(&self) -> Arc<SchemaGraph> {
        Arc::clone(&self.graph)
    }

    pub fn config(&self) -> &SqlMateConfig {
        &self.config
    }

    pub fn manifest(&self) -> SchemaManifest {
        SchemaManifest::from_graph(&self.graph, &self.config)
    }

    /// Write `db_schema.json` into `dir`
    pub fn write_manifest(&self, dir: impl AsRef<Path>) -> SqlMateResult<PathBuf> {
        let manifest = self.manifest();
        let path = manifest.write_to_dir(dir)?;
        log::info!("Wrote schema manifest with {} tables to {}", manifest.tables.len(), path.display());
        Ok(path)
    }

    pub fn compile_query(
        &self,
        selections: &[QuerySelection],
        options: &QueryOptions,
    ) -> SqlMateResult<CompiledQuery> {
        Ok(QueryCompiler::new(&self.graph, &self.config).compile(selections, options)?)
    }

    pub fn compile_update(&self, spec: &UpdateSpec) -> SqlMateResult<Option<CompiledUpdate>> {
        Ok(UpdateCompiler::new(&self.graph, &self.config).compile(spec)?)
    }

    /// Compile an update restricted to `username`'s own tables
    pub fn compile_user_update(
        &self,
        username: &str,
        spec: &UpdateSpec,
    ) -> SqlMateResult<Option<CompiledUpdate>> {
        Ok(UpdateCompiler::new(&self.graph, &self.config).compile_for_user(username, spec)?)
    }

    /// Register the columns of a derived table the user just created
    ///
    /// Returns the physical table name, `<prefix><username>_<table>`.
    pub fn register_user_table(&self, username: &str, table: &str) -> SqlMateResult<String> {
        let name = user_table_name(&self.config.user_table_prefix, username, table)?;
        self.graph.add_table(self.introspector.as_ref(), &name)?;
        Ok(name)
    }

    /// Re-register every derived table the introspector still reports
    ///
    /// Startup leaves user tables out of the graph; call this afterwards so
    /// updates against them are typed again. Returns how many were restored.
    pub fn restore_user_tables(&self) -> SqlMateResult<usize> {
        let user_schema = self.config.user_schema.as_str();
        let tables = self.introspector.tables()?;
        let mut restored = 0;
        for row in tables {
            let in_user_schema = match row.schema.as_deref() {
                None => true,
                Some(schema) => schema == user_schema || !self.config.qualifies_table_keys(),
            };
            if !in_user_schema || !self.config.is_user_table(&row.table) {
                continue;
            }
            self.graph.add_table(self.introspector.as_ref(), &row.table)?;
            restored += 1;
        }
        log::info!("Restored {} user tables", restored);
        Ok(restored)
    }

    /// Compile and execute a query
    pub fn run_query(
        &self,
        selections: &[QuerySelection],
        options: &QueryOptions,
    ) -> SqlMateResult<QueryTable> {
        let compiled = self.compile_query(selections, options)?;
        let output = self.executor()?.execute(&compiled.statement)?;
        output.check_shape()?;

        Ok(QueryTable {
            columns: output.columns,
            rows: output.rows,
            query: compiled.statement.sql,
            selection_count: compiled.selection_count,
        })
    }

    /// Compile and execute an update, returning the affected row count
    ///
    /// When `username` is given the target must belong to that user. An
    /// update that compiles to nothing is not sent and reports 0 rows.
    pub fn run_update(&self, username: Option<&str>, spec: &UpdateSpec) -> SqlMateResult<u64> {
        let compiled = match username {
            Some(username) => self.compile_user_update(username, spec)?,
            None => self.compile_update(spec)?,
        };
        match compiled {
            Some(update) => Ok(self.executor()?.execute_update(&update.statement)?),
            None => Ok(0),
        }
    }

    fn executor(&self) -> SqlMateResult<&Arc<dyn SqlExecutor>> {
        self.executor
            .as_ref()
            .ok_or(SqlMateError::Execution(ExecutionError::NotConfigured))
    }
}
