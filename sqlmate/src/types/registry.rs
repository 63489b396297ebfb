// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-table column type registry

use super::canonical::{normalize, CanonicalType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One registered column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub name: String,
    /// Vendor type name as reported by introspection
    pub raw_type: String,
    pub canonical: CanonicalType,
}

/// Column name to canonical type mapping for one table
///
/// Columns keep their registration order (ordinal position when fed from
/// introspection). Registering a column twice overwrites the earlier entry
/// in place.
#[derive(Debug, Clone, Default)]
pub struct TableTypes {
    columns: Vec<ColumnType>,
    index: HashMap<String, usize>,
}

impl TableTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column, normalizing its raw type
    pub fn add(&mut self, column: &str, raw_type: &str) {
        let entry = ColumnType {
            name: column.to_string(),
            raw_type: raw_type.to_string(),
            canonical: normalize(raw_type),
        };

        match self.index.get(column) {
            Some(&position) => self.columns[position] = entry,
            None => {
                self.index.insert(column.to_string(), self.columns.len());
                self.columns.push(entry);
            }
        }
    }

    /// Canonical type of a column; `Unknown` when the column is not registered
    pub fn get(&self, column: &str) -> CanonicalType {
        self.index
            .get(column)
            .map(|&position| self.columns[position].canonical)
            .unwrap_or(CanonicalType::Unknown)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
