// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema graph
//!
//! Tables are nodes, declared foreign keys are edges. The graph is built once
//! from a full introspection pass and then shared read-mostly by every
//! request. Adjacency never changes after the build; column types grow when
//! a user's derived table is registered through [`SchemaGraph::add_table`].
//!
//! # Thread Safety
//!
//! Column types live behind a `parking_lot::RwLock`. Each table's registry is
//! an `Arc<TableTypes>` replaced wholesale on write, so readers clone the
//! `Arc` out and never observe a half-registered table.

use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::filter::TableFilter;
use super::introspection::{ColumnRow, Introspector};
use crate::config::SqlMateConfig;
use crate::types::{CanonicalType, TableTypes};
use parking_lot::RwLock;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Column type storage, keyed by table, remembering registration order
#[derive(Debug, Default)]
struct TypeStore {
    order: Vec<String>,
    tables: HashMap<String, Arc<TableTypes>>,
}

impl TypeStore {
    fn insert(&mut self, table: &str, types: TableTypes) {
        if !self.tables.contains_key(table) {
            self.order.push(table.to_string());
        }
        self.tables.insert(table.to_string(), Arc::new(types));
    }
}

/// Summary of one build pass, logged at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub tables: usize,
    pub typed_tables: usize,
    pub foreign_keys: usize,
    pub components: usize,
}

/// Foreign-key graph plus per-table column types
#[derive(Debug)]
pub struct SchemaGraph {
    adjacency: HashMap<String, Vec<Edge>>,
    /// Adjacency keys in insertion order
    table_order: Vec<String>,
    foreign_keys: usize,
    column_types: RwLock<TypeStore>,
}

impl SchemaGraph {
    /// Build the graph from one full introspection pass
    ///
    /// Any introspection failure aborts the build with
    /// [`GraphError::GraphBuildFailure`]; a partial graph is never returned.
    pub fn build(introspector: &dyn Introspector, config: &SqlMateConfig) -> GraphResult<Self> {
        let filter = TableFilter::new(config);
        let mut graph = SchemaGraph::empty();

        // Column types
        let rows = introspector.columns().map_err(build_failure)?;
        let mut pending: Vec<(String, TableTypes)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for row in rows {
            if !filter.admits(row.schema.as_deref(), &row.table) {
                continue;
            }
            let key = config.table_key(row.schema.as_deref(), &row.table);
            let position = *positions.entry(key.clone()).or_insert_with(|| {
                pending.push((key.clone(), TableTypes::new()));
                pending.len() - 1
            });
            pending[position].1.add(&row.column, &row.data_type);
        }
        {
            let mut store = graph.column_types.write();
            for (key, types) in pending {
                store.insert(&key, types);
            }
        }

        // Foreign keys
        let tables = introspector.tables().map_err(build_failure)?;
        for table in tables {
            if !filter.admits(table.schema.as_deref(), &table.table) {
                log::debug!("Skipping out-of-scope table {}", table.table);
                continue;
            }
            let key = config.table_key(table.schema.as_deref(), &table.table);
            graph.ensure_node(&key);

            let foreign_keys = introspector.foreign_keys(&table).map_err(build_failure)?;
            for fk in foreign_keys {
                let referenced_schema = fk.referenced_schema.as_deref().or(table.schema.as_deref());
                if !filter.admits(referenced_schema, &fk.referenced_table) {
                    log::warn!(
                        "Skipping foreign key {}.{} -> {}: referenced table is out of scope",
                        key,
                        fk.column,
                        fk.referenced_table
                    );
                    continue;
                }
                let referenced = config.table_key(referenced_schema, &fk.referenced_table);
                graph.add_foreign_key(Edge::new(&key, &referenced, &fk.column, &fk.referenced_column));
            }
        }

        let stats = graph.stats();
        log::info!(
            "Schema graph built: {} tables, {} typed tables, {} foreign keys, {} connected components",
            stats.tables,
            stats.typed_tables,
            stats.foreign_keys,
            stats.components
        );

        Ok(graph)
    }

    /// Graph with no tables
    pub fn empty() -> Self {
        Self {
            adjacency: HashMap::new(),
            table_order: Vec::new(),
            foreign_keys: 0,
            column_types: RwLock::new(TypeStore::default()),
        }
    }

    fn ensure_node(&mut self, table: &str) -> &mut Vec<Edge> {
        if !self.adjacency.contains_key(table) {
            self.table_order.push(table.to_string());
        }
        self.adjacency.entry(table.to_string()).or_default()
    }

    /// Store a foreign key in both directions
    fn add_foreign_key(&mut self, edge: Edge) {
        let mirror = edge.reversed();
        self.ensure_node(&edge.source).push(edge);
        self.ensure_node(&mirror.source).push(mirror);
        self.foreign_keys += 1;
    }

    /// Register the columns of a table created after startup
    ///
    /// Derived tables never carry foreign keys, so adjacency is untouched.
    pub fn add_table(&self, introspector: &dyn Introspector, table: &str) -> GraphResult<()> {
        let rows = introspector.table_columns(table)?;
        self.add_table_columns(table, &rows);
        Ok(())
    }

    /// Register already-fetched column rows under `table`
    pub fn add_table_columns(&self, table: &str, rows: &[ColumnRow]) {
        let mut store = self.column_types.write();
        let mut types = store
            .tables
            .get(table)
            .map(|existing| (**existing).clone())
            .unwrap_or_default();
        for row in rows {
            types.add(&row.column, &row.data_type);
        }

        let column_count = types.len();
        store.insert(table, types);
        drop(store);
        log::info!("Registered table {} with {} columns", table, column_count);
    }

    /// Canonical type of `table.column`, `Unknown` when not registered
    pub fn lookup(&self, table: &str, column: &str) -> CanonicalType {
        self.column_types
            .read()
            .tables
            .get(table)
            .map(|types| types.get(column))
            .unwrap_or(CanonicalType::Unknown)
    }

    pub fn table_types(&self, table: &str) -> Option<Arc<TableTypes>> {
        self.column_types.read().tables.get(table).cloned()
    }

    /// Registered tables with their column types, in registration order
    pub fn typed_tables(&self) -> Vec<(String, Arc<TableTypes>)> {
        let store = self.column_types.read();
        store
            .order
            .iter()
            .filter_map(|name| store.tables.get(name).map(|t| (name.clone(), t.clone())))
            .collect()
    }

    /// Whether the table is a graph node or has registered columns
    pub fn contains_table(&self, table: &str) -> bool {
        self.adjacency.contains_key(table) || self.column_types.read().tables.contains_key(table)
    }

    /// Whether the table was scanned for foreign keys
    pub fn has_node(&self, table: &str) -> bool {
        self.adjacency.contains_key(table)
    }

    /// Outgoing edges of `table` in discovery order
    pub fn edges(&self, table: &str) -> &[Edge] {
        self.adjacency.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Graph nodes in discovery order
    pub fn tables(&self) -> &[String] {
        &self.table_order
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn foreign_key_count(&self) -> usize {
        self.foreign_keys
    }

    /// Groups of mutually reachable tables, in discovery order
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let (graph, _) = self.to_petgraph();
        let mut sets = UnionFind::<usize>::new(graph.node_count());
        for edge in graph.raw_edges() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut groups: Vec<Vec<String>> = Vec::new();
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        for index in graph.node_indices() {
            let root = sets.find(index.index());
            let group = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(graph[index].clone());
        }
        groups
    }

    pub fn stats(&self) -> GraphStats {
        let (graph, _) = self.to_petgraph();
        GraphStats {
            tables: self.table_order.len(),
            typed_tables: self.column_types.read().order.len(),
            foreign_keys: self.foreign_keys,
            components: connected_components(&graph),
        }
    }

    /// Undirected view with one petgraph edge per foreign key
    fn to_petgraph(&self) -> (UnGraph<String, ()>, HashMap<&str, NodeIndex>) {
        let mut graph = UnGraph::<String, ()>::new_undirected();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
        for table in &self.table_order {
            indices.insert(table.as_str(), graph.add_node(table.clone()));
        }
        for table in &self.table_order {
            for edge in self.edges(table) {
                // each foreign key is stored twice; keep one direction
                if edge.source.as_str() > edge.destination.as_str() {
                    continue;
                }
                if let (Some(&a), Some(&b)) = (
                    indices.get(edge.source.as_str()),
                    indices.get(edge.destination.as_str()),
                ) {
                    graph.add_edge(a, b, ());
                }
            }
        }
        (graph, indices)
    }
}

fn build_failure(err: GraphError) -> GraphError {
    match err {
        GraphError::GraphBuildFailure(_) => err,
        other => GraphError::GraphBuildFailure(other.to_string()),
    }
}

impl fmt::Display for SchemaGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.table_order {
            let edges: Vec<String> = self.edges(table).iter().map(Edge::to_string).collect();
            writeln!(f, "{}: {}", table, edges.join(", "))?;
        }
        Ok(())
    }
}
