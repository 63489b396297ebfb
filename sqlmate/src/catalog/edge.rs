// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Foreign-key edges between tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// One direction of a foreign-key relationship
///
/// Column fields are fully qualified `table.column` strings. Every foreign
/// key is stored as two edges, one per direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub destination: String,
    pub source_column: String,
    pub destination_column: String,
}

impl Edge {
    pub fn new(source: &str, destination: &str, source_column: &str, destination_column: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            source_column: format!("{}.{}", source, source_column),
            destination_column: format!("{}.{}", destination, destination_column),
        }
    }

    /// The mirror edge, pointing back at `source`
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
            source_column: self.destination_column.clone(),
            destination_column: self.source_column.clone(),
        }
    }

    /// Join predicate, `src.col=dst.col`
    pub fn predicate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.source_column, self.destination_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_qualifies_columns() {
        let edge = Edge::new("orders", "customers", "customer_id", "id");
        assert_eq!(edge.source_column, "orders.customer_id");
        assert_eq!(edge.destination_column, "customers.id");
        assert_eq!(edge.predicate(), "orders.customer_id=customers.id");
    }

    #[test]
    fn test_reversed_mirrors_columns() {
        let edge = Edge::new("sales.orders", "sales.customers", "customer_id", "id");
        let back = edge.reversed();
        assert_eq!(back.source, "sales.customers");
        assert_eq!(back.destination, "sales.orders");
        assert_eq!(back.source_column, edge.destination_column);
        assert_eq!(back.destination_column, edge.source_column);
        assert_eq!(back.reversed(), edge);
    }
}
