// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query compilation
//!
//! Turns an ordered list of column selections into one SELECT statement,
//! discovering the JOINs that connect every referenced table.
//!
//! # Join Strategies
//!
//! With [`JoinStrategy::Tree`] each further table is reached by a search
//! seeded with every table joined so far, so the FROM clause is a connected
//! tree and no table appears twice. [`JoinStrategy::AnchorPairwise`] resolves
//! each table from the anchor independently and appends the hops verbatim;
//! when two paths share an intermediate table that table is joined twice.

use super::error::{CompileError, CompileResult};
use super::identifier::{validate_column, validate_table};
use super::ir::{ColumnRef, Condition, Expr, FromClause, OrderItem, SelectPlan};
use super::path::JoinPathResolver;
use super::render::{CompiledStatement, SqlRenderer};
use super::request::{QueryOptions, QuerySelection};
use crate::catalog::SchemaGraph;
use crate::config::{JoinStrategy, SqlMateConfig};

/// Compiled SELECT plus the structure it was rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub statement: CompiledStatement,
    /// Number of selections the caller supplied
    pub selection_count: usize,
    pub plan: SelectPlan,
}

impl CompiledQuery {
    pub fn sql(&self) -> &str {
        &self.statement.sql
    }
}

pub struct QueryCompiler<'g> {
    graph: &'g SchemaGraph,
    renderer: SqlRenderer,
    strategy: JoinStrategy,
}

impl<'g> QueryCompiler<'g> {
    pub fn new(graph: &'g SchemaGraph, config: &SqlMateConfig) -> Self {
        Self {
            graph,
            renderer: SqlRenderer::from_config(config),
            strategy: config.join_strategy,
        }
    }

    pub fn with_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Compile selections and options into a SELECT statement
    ///
    /// # Arguments
    ///
    /// * `selections` - Columns to project or filter on; the first one picks
    ///   the anchor table
    /// * `options` - Distinct, grouping, ordering and paging
    ///
    /// # Returns
    ///
    /// The rendered statement, or `EmptySelection` / `NoJoinPath` /
    /// `InvalidIdentifier` / `InvalidLiteral`
    pub fn compile(
        &self,
        selections: &[QuerySelection],
        options: &QueryOptions,
    ) -> CompileResult<CompiledQuery> {
        let plan = self.plan(selections, options)?;
        let statement = self.renderer.render_select(&plan);
        log::debug!("Compiled query: {}", statement.sql);

        Ok(CompiledQuery {
            statement,
            selection_count: selections.len(),
            plan,
        })
    }

    /// Build the typed plan without rendering it
    pub fn plan(&self, selections: &[QuerySelection], options: &QueryOptions) -> CompileResult<SelectPlan> {
        if selections.is_empty() {
            return Err(CompileError::EmptySelection);
        }
        Self::validate(selections, options)?;
        for key in options.extra.keys() {
            log::warn!("Ignoring unrecognized query option '{}'", key);
        }

        let tables = Self::participating_tables(selections, options);
        let mut plan = SelectPlan::new(self.build_from(&tables)?);

        plan.items = selections
            .iter()
            .filter(|s| s.project)
            .map(|s| match s.aggregate {
                Some(aggregate) => Expr::Aggregate(aggregate, s.column_ref()),
                None => Expr::Column(s.column_ref()),
            })
            .collect();
        if plan.items.is_empty() {
            return Err(CompileError::EmptySelection);
        }

        for selection in selections {
            let column_type = self.graph.lookup(&selection.table, &selection.column);
            for predicate in &selection.filters {
                match selection.aggregate {
                    Some(aggregate) => {
                        let target = Expr::Aggregate(aggregate, selection.column_ref()).to_string();
                        let value_type = aggregate.result_type(column_type);
                        plan.having
                            .push(Condition::from_predicate(target, predicate, value_type)?);
                    }
                    None => {
                        let target = selection.column_ref().to_string();
                        plan.where_clause
                            .push(Condition::from_predicate(target, predicate, column_type)?);
                    }
                }
            }
        }

        plan.group_by = if !options.group_by.is_empty() {
            options.group_by.clone()
        } else if plan.items.iter().any(Expr::is_aggregate) {
            let mut keys: Vec<ColumnRef> = Vec::new();
            for item in plan.items.iter().filter(|item| !item.is_aggregate()) {
                if !keys.contains(item.column()) {
                    keys.push(item.column().clone());
                }
            }
            keys
        } else {
            Vec::new()
        };

        plan.distinct = options.distinct;
        plan.order_by = options
            .order_by
            .iter()
            .map(|order| OrderItem {
                column: ColumnRef::new(&order.table, &order.column),
                descending: order.descending,
            })
            .collect();
        plan.limit = options.limit;
        plan.offset = options.offset;

        Ok(plan)
    }

    fn validate(selections: &[QuerySelection], options: &QueryOptions) -> CompileResult<()> {
        for selection in selections {
            validate_table(&selection.table)?;
            validate_column(&selection.column)?;
        }
        for column in &options.group_by {
            validate_table(&column.table)?;
            validate_column(&column.column)?;
        }
        for order in &options.order_by {
            validate_table(&order.table)?;
            validate_column(&order.column)?;
        }
        Ok(())
    }

    /// Distinct tables in first-appearance order: selections, then grouping,
    /// then ordering
    fn participating_tables(selections: &[QuerySelection], options: &QueryOptions) -> Vec<String> {
        let mut tables: Vec<String> = Vec::new();
        let referenced = selections
            .iter()
            .map(|s| s.table.as_str())
            .chain(options.group_by.iter().map(|c| c.table.as_str()))
            .chain(options.order_by.iter().map(|o| o.table.as_str()));
        for table in referenced {
            if !tables.iter().any(|t| t == table) {
                tables.push(table.to_string());
            }
        }
        tables
    }

    fn build_from(&self, tables: &[String]) -> CompileResult<FromClause> {
        let resolver = JoinPathResolver::new(self.graph);
        let mut from = FromClause::new(&tables[0]);

        match self.strategy {
            JoinStrategy::Tree => {
                let mut joined = vec![from.anchor.clone()];
                for table in &tables[1..] {
                    for step in resolver.extend_tree(&joined, table)? {
                        joined.push(step.table.clone());
                        from.joins.push(step);
                    }
                }
            }
            JoinStrategy::AnchorPairwise => {
                for table in &tables[1..] {
                    if from.contains(table) {
                        continue;
                    }
                    let steps = resolver.find_join_path(&from.anchor, table)?;
                    from.joins.extend(steps);
                }
            }
        }

        log::debug!(
            "Joined {} tables from anchor {} ({:?})",
            from.joins.len() + 1,
            from.anchor,
            self.strategy
        );
        Ok(from)
    }
}
