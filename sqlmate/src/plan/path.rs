// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Join path discovery
//!
//! Breadth-first search over the schema graph's adjacency lists. The first
//! path found has the fewest hops; among equally short paths the winner is
//! whichever edge was discovered first during introspection. That tie-break
//! is deterministic, not cost-aware.

use super::ir::JoinStep;
use crate::catalog::{Edge, GraphError, GraphResult, SchemaGraph};
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds JOIN hops between tables of one [`SchemaGraph`]
#[derive(Debug, Clone, Copy)]
pub struct JoinPathResolver<'g> {
    graph: &'g SchemaGraph,
}

impl<'g> JoinPathResolver<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self { graph }
    }

    /// Shortest sequence of hops from `source` to `destination`
    ///
    /// Returns an empty path when both names are the same table.
    pub fn find_join_path(&self, source: &str, destination: &str) -> GraphResult<Vec<JoinStep>> {
        self.extend_tree(&[source.to_string()], destination)
    }

    /// Hops from `source` to `destination` as `JOIN t ON a.x=t.y` fragments
    /// separated by single spaces
    pub fn find_join_clause(&self, source: &str, destination: &str) -> GraphResult<String> {
        let path = self.find_join_path(source, destination)?;
        let clause = path
            .iter()
            .map(JoinStep::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        log::debug!("Join clause {} -> {}: '{}'", source, destination, clause);
        Ok(clause)
    }

    /// The direct edge `source -> destination`, if the tables share a foreign key
    pub fn find_edge(&self, source: &str, destination: &str) -> GraphResult<Edge> {
        self.graph
            .edges(source)
            .iter()
            .find(|edge| edge.destination == destination)
            .cloned()
            .ok_or_else(|| GraphError::NoDirectEdge {
                from: source.to_string(),
                to: destination.to_string(),
            })
    }

    /// Shortest hops connecting `target` to any table in `joined`
    ///
    /// The search is seeded with every table in `joined`, in order, so the
    /// returned hops never re-join one of them. An empty `joined` slice has
    /// nothing to grow from and always fails.
    pub fn extend_tree(&self, joined: &[String], target: &str) -> GraphResult<Vec<JoinStep>> {
        let no_path = || GraphError::NoJoinPath {
            from: joined.first().cloned().unwrap_or_default(),
            to: target.to_string(),
        };

        if joined.iter().any(|table| table == target) {
            return Ok(Vec::new());
        }

        let mut visited: HashSet<&str> = joined.iter().map(String::as_str).collect();
        let mut queue: VecDeque<&str> = joined.iter().map(String::as_str).collect();
        // edge used to reach each discovered table
        let mut reached_by: HashMap<&str, &Edge> = HashMap::new();

        while let Some(node) = queue.pop_front() {
            if node == target {
                return Ok(Self::unwind(&reached_by, target));
            }
            for edge in self.graph.edges(node) {
                let next = edge.destination.as_str();
                if visited.insert(next) {
                    reached_by.insert(next, edge);
                    queue.push_back(next);
                }
            }
        }

        Err(no_path())
    }

    /// Walk parent edges back from `target` to a seed table
    fn unwind(reached_by: &HashMap<&str, &Edge>, target: &str) -> Vec<JoinStep> {
        let mut steps = Vec::new();
        let mut current = target;
        while let Some(edge) = reached_by.get(current) {
            steps.push(JoinStep::new((*edge).clone()));
            current = edge.source.as_str();
        }
        steps.reverse();
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SnapshotIntrospector, SnapshotTable};
    use crate::config::SqlMateConfig;

    fn graph(tables: Vec<SnapshotTable>) -> SchemaGraph {
        SchemaGraph::build(&SnapshotIntrospector::new(tables), &SqlMateConfig::default()).unwrap()
    }

    /// a-b, b-c, a-d, d-c with a-b discovered first
    fn diamond() -> SchemaGraph {
        graph(vec![
            SnapshotTable::new("a")
                .column("b_id", "int")
                .column("d_id", "int")
                .foreign_key("b_id", "b", "id")
                .foreign_key("d_id", "d", "id"),
            SnapshotTable::new("b")
                .column("id", "int")
                .column("c_id", "int")
                .foreign_key("c_id", "c", "id"),
            SnapshotTable::new("d")
                .column("id", "int")
                .column("c_id", "int")
                .foreign_key("c_id", "c", "id"),
            SnapshotTable::new("c").column("id", "int"),
        ])
    }

    #[test]
    fn test_same_table_is_empty_clause() {
        let graph = diamond();
        let resolver = JoinPathResolver::new(&graph);
        assert_eq!(resolver.find_join_clause("a", "a").unwrap(), "");
    }

    #[test]
    fn test_shortest_path_prefers_first_discovered() {
        let graph = diamond();
        let resolver = JoinPathResolver::new(&graph);
        assert_eq!(
            resolver.find_join_clause("a", "c").unwrap(),
            "JOIN b ON a.b_id=b.id JOIN c ON b.c_id=c.id"
        );
    }

    #[test]
    fn test_disconnected_tables_fail() {
        let graph = graph(vec![
            SnapshotTable::new("a").column("b_id", "int").foreign_key("b_id", "b", "id"),
            SnapshotTable::new("b").column("id", "int"),
            SnapshotTable::new("c").column("d_id", "int").foreign_key("d_id", "d", "id"),
            SnapshotTable::new("d").column("id", "int"),
        ]);
        let resolver = JoinPathResolver::new(&graph);

        let err = resolver.find_join_clause("a", "c").unwrap_err();
        assert!(matches!(err, GraphError::NoJoinPath { .. }));
        assert_eq!(err.to_string(), "No path found between a and c");
    }

    #[test]
    fn test_find_edge_both_directions() {
        let graph = diamond();
        let resolver = JoinPathResolver::new(&graph);

        let forward = resolver.find_edge("a", "b").unwrap();
        let backward = resolver.find_edge("b", "a").unwrap();
        assert_eq!(forward.source_column, backward.destination_column);
        assert_eq!(forward.destination_column, backward.source_column);

        assert!(matches!(
            resolver.find_edge("a", "c"),
            Err(GraphError::NoDirectEdge { .. })
        ));
    }

    #[test]
    fn test_extend_tree_reuses_joined_tables() {
        let graph = diamond();
        let resolver = JoinPathResolver::new(&graph);

        let joined = vec!["a".to_string(), "b".to_string()];
        let steps = resolver.extend_tree(&joined, "c").unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].to_string(), "JOIN c ON b.c_id=c.id");

        assert!(resolver.extend_tree(&joined, "b").unwrap().is_empty());
    }

    #[test]
    fn test_extend_tree_without_seed_fails() {
        let graph = diamond();
        let resolver = JoinPathResolver::new(&graph);
        assert!(resolver.extend_tree(&[], "a").is_err());
    }
}
