// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Update compilation
//!
//! Only per-user derived tables are writable. Updates are always single-table,
//! so no join discovery happens here.

use super::error::{CompileError, CompileResult};
use super::identifier::{ensure_owned_by, ensure_user_table, validate_column};
use super::ir::{Assignment, Condition, UpdatePlan};
use super::render::{CompiledStatement, SqlRenderer};
use super::request::UpdateSpec;
use crate::catalog::SchemaGraph;
use crate::config::{bare_name, SqlMateConfig};
use crate::types::{CanonicalType, TableTypes};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUpdate {
    pub statement: CompiledStatement,
    pub plan: UpdatePlan,
}

impl CompiledUpdate {
    pub fn sql(&self) -> &str {
        &self.statement.sql
    }
}

pub struct UpdateCompiler<'g> {
    graph: &'g SchemaGraph,
    renderer: SqlRenderer,
    prefix: String,
}

impl<'g> UpdateCompiler<'g> {
    pub fn new(graph: &'g SchemaGraph, config: &SqlMateConfig) -> Self {
        Self {
            graph,
            renderer: SqlRenderer::from_config(config),
            prefix: config.user_table_prefix.clone(),
        }
    }

    /// Compile an update against any user-prefixed table
    ///
    /// Returns `Ok(None)` when the filter can never match, so there is
    /// nothing to execute.
    pub fn compile(&self, spec: &UpdateSpec) -> CompileResult<Option<CompiledUpdate>> {
        ensure_user_table(&self.prefix, &spec.table)?;
        self.compile_checked(spec)
    }

    /// Compile an update that must target one of `username`'s own tables
    pub fn compile_for_user(
        &self,
        username: &str,
        spec: &UpdateSpec,
    ) -> CompileResult<Option<CompiledUpdate>> {
        ensure_owned_by(&self.prefix, username, &spec.table)?;
        self.compile_checked(spec)
    }

    fn compile_checked(&self, spec: &UpdateSpec) -> CompileResult<Option<CompiledUpdate>> {
        if spec.assignments.is_empty() {
            return Err(CompileError::EmptyAssignment(spec.table.clone()));
        }

        let types = self.table_types(&spec.table);
        let type_of = |column: &str| {
            types
                .as_ref()
                .map(|t| t.get(column))
                .unwrap_or(CanonicalType::Unknown)
        };

        let mut assignments = Vec::with_capacity(spec.assignments.len());
        for (column, value) in &spec.assignments {
            validate_column(column)?;
            let value_type = type_of(column);
            let label = format!("{}.{}", spec.table, column);
            assignments.push(Assignment {
                column: column.clone(),
                value: value.coerce(&label, value_type)?,
                value_type,
            });
        }

        let mut where_clause = Vec::with_capacity(spec.filters.len());
        for filter in &spec.filters {
            validate_column(&filter.column)?;
            where_clause.push(Condition::from_predicate(
                filter.column.clone(),
                &filter.predicate,
                type_of(&filter.column),
            )?);
        }

        if where_clause.iter().any(Condition::is_always_false) {
            log::debug!("Update of {} matches no rows; nothing to execute", spec.table);
            return Ok(None);
        }
        if where_clause.is_empty() {
            log::warn!("Update of {} has no filter and will touch every row", spec.table);
        }

        let plan = UpdatePlan {
            table: spec.table.clone(),
            assignments,
            where_clause,
        };
        let statement = self.renderer.render_update(&plan);
        log::debug!("Compiled update: {}", statement.sql);

        Ok(Some(CompiledUpdate { statement, plan }))
    }

    /// Registered types for the target, falling back to its bare name
    fn table_types(&self, table: &str) -> Option<Arc<TableTypes>> {
        self.graph
            .table_types(table)
            .or_else(|| self.graph.table_types(bare_name(table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnRow, SnapshotIntrospector, SnapshotTable};
    use crate::config::ParamStyle;
    use crate::plan::request::Predicate;
    use crate::plan::value::SqlValue;

    fn graph_with_report() -> SchemaGraph {
        let snapshot = SnapshotIntrospector::new(vec![SnapshotTable::new("orders").column("id", "int")]);
        let graph = SchemaGraph::build(&snapshot, &SqlMateConfig::default()).unwrap();
        let rows: Vec<ColumnRow> = [("id", "int"), ("score", "float"), ("label", "varchar(20)")]
            .iter()
            .map(|(column, data_type)| ColumnRow {
                schema: None,
                table: "u_alice_report".to_string(),
                column: column.to_string(),
                data_type: data_type.to_string(),
            })
            .collect();
        graph.add_table_columns("u_alice_report", &rows);
        graph
    }

    fn inline() -> SqlMateConfig {
        SqlMateConfig {
            param_style: ParamStyle::Inline,
            ..SqlMateConfig::default()
        }
    }

    #[test]
    fn test_shared_table_rejected() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &SqlMateConfig::default());
        let err = compiler
            .compile(&UpdateSpec::new("orders").set("id", 1i64))
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_empty_assignment_rejected() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &SqlMateConfig::default());
        assert!(matches!(
            compiler.compile(&UpdateSpec::new("u_alice_report")),
            Err(CompileError::EmptyAssignment(_))
        ));
    }

    #[test]
    fn test_typed_inline_update() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &inline());
        let update = compiler
            .compile(
                &UpdateSpec::new("u_alice_report")
                    .set("score", "9.5")
                    .set("label", 7i64)
                    .filter("id", Predicate::eq("3")),
            )
            .unwrap()
            .unwrap();

        assert_eq!(
            update.sql(),
            "UPDATE u_alice_report SET label = '7', score = 9.5 WHERE id = 3"
        );
    }

    #[test]
    fn test_named_params() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &SqlMateConfig::default());
        let update = compiler
            .compile(
                &UpdateSpec::new("u_alice_report")
                    .set("score", 1.25)
                    .filter("id", Predicate::is_in([1i64, 2])),
            )
            .unwrap()
            .unwrap();

        assert_eq!(update.sql(), "UPDATE u_alice_report SET score = :p1 WHERE id IN (:p2, :p3)");
        assert_eq!(update.statement.params[2].value, SqlValue::Int(2));
    }

    #[test]
    fn test_unknown_columns_pass_values_through() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &inline());
        let update = compiler
            .compile(&UpdateSpec::new("u_alice_other").set("n", 5i64).set("s", "x"))
            .unwrap()
            .unwrap();
        assert_eq!(update.sql(), "UPDATE u_alice_other SET n = 5, s = 'x'");
    }

    #[test]
    fn test_qualified_target_uses_bare_types() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &inline());
        let err = compiler
            .compile(&UpdateSpec::new("sqlmate.u_alice_report").set("score", "high"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid literal for sqlmate.u_alice_report.score: expected FLOAT, got high"
        );
    }

    #[test]
    fn test_empty_in_filter_is_nothing_to_do() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &SqlMateConfig::default());
        let values: Vec<i64> = Vec::new();
        let result = compiler
            .compile(&UpdateSpec::new("u_alice_report").set("score", 1i64).filter("id", Predicate::is_in(values)))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_owner_check() {
        let graph = graph_with_report();
        let compiler = UpdateCompiler::new(&graph, &SqlMateConfig::default());
        let spec = UpdateSpec::new("u_alice_report").set("score", 2i64);

        assert!(compiler.compile_for_user("alice", &spec).unwrap().is_some());
        assert!(matches!(
            compiler.compile_for_user("bob", &spec),
            Err(CompileError::InvalidIdentifier(_))
        ));
    }
}
