// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Introspection boundary
//!
//! The schema graph never talks to a database directly. It consumes catalog
//! metadata through the [`Introspector`] trait, which a live driver
//! implements by querying `information_schema`. [`SnapshotIntrospector`]
//! serves the same rows from an in-memory (or JSON file) snapshot.

use super::error::{GraphError, GraphResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One column of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub data_type: String,
}

/// One table in scope of the introspection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub schema: Option<String>,
    pub table: String,
}

/// One declared foreign key, as seen from its owning table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRow {
    pub column: String,
    #[serde(default)]
    pub referenced_schema: Option<String>,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Catalog metadata source consumed at startup and by `add_table`
pub trait Introspector: Send + Sync {
    /// Every column of every table, ordered by table then ordinal position
    fn columns(&self) -> GraphResult<Vec<ColumnRow>>;

    /// Every table whose foreign keys should be scanned
    fn tables(&self) -> GraphResult<Vec<TableRow>>;

    /// Foreign keys declared by `table`
    fn foreign_keys(&self, table: &TableRow) -> GraphResult<Vec<ForeignKeyRow>>;

    /// Columns of a single, possibly just-created, table
    fn table_columns(&self, table: &str) -> GraphResult<Vec<ColumnRow>>;
}

/// Column entry of a snapshot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

/// One table of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTable {
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<SnapshotColumn>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyRow>,
}

impl SnapshotTable {
    pub fn new(name: &str) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn in_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn column(mut self, name: &str, data_type: &str) -> Self {
        self.columns.push(SnapshotColumn {
            name: name.to_string(),
            data_type: data_type.to_string(),
        });
        self
    }

    /// Declare `column` as referencing `referenced_table.referenced_column`
    /// in the same schema
    pub fn foreign_key(mut self, column: &str, referenced_table: &str, referenced_column: &str) -> Self {
        self.foreign_keys.push(ForeignKeyRow {
            column: column.to_string(),
            referenced_schema: self.schema.clone(),
            referenced_table: referenced_table.to_string(),
            referenced_column: referenced_column.to_string(),
        });
        self
    }

    fn matches(&self, table: &str) -> bool {
        match &self.schema {
            Some(schema) => self.name == table || format!("{}.{}", schema, self.name) == table,
            None => self.name == table,
        }
    }

    fn column_rows(&self) -> impl Iterator<Item = ColumnRow> + '_ {
        self.columns.iter().map(move |c| ColumnRow {
            schema: self.schema.clone(),
            table: self.name.clone(),
            column: c.name.clone(),
            data_type: c.data_type.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    tables: Vec<SnapshotTable>,
}

/// In-memory catalog snapshot
///
/// Tables are reported in insertion order. `insert_table` mimics a derived
/// table being created while the service runs.
#[derive(Debug, Default)]
pub struct SnapshotIntrospector {
    tables: RwLock<Vec<SnapshotTable>>,
}

impl SnapshotIntrospector {
    pub fn new(tables: Vec<SnapshotTable>) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Parse a `{"tables": [...]}` document
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Ok(Self::new(document.tables))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn insert_table(&self, table: SnapshotTable) {
        self.tables.write().push(table);
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }
}

impl Introspector for SnapshotIntrospector {
    fn columns(&self) -> GraphResult<Vec<ColumnRow>> {
        let tables = self.tables.read();
        Ok(tables.iter().flat_map(|t| t.column_rows()).collect())
    }

    fn tables(&self) -> GraphResult<Vec<TableRow>> {
        let tables = self.tables.read();
        Ok(tables
            .iter()
            .map(|t| TableRow {
                schema: t.schema.clone(),
                table: t.name.clone(),
            })
            .collect())
    }

    fn foreign_keys(&self, table: &TableRow) -> GraphResult<Vec<ForeignKeyRow>> {
        let tables = self.tables.read();
        let found = tables
            .iter()
            .find(|t| t.name == table.table && t.schema == table.schema)
            .ok_or_else(|| GraphError::introspection(format!("unknown table {}", table.table)))?;
        Ok(found.foreign_keys.clone())
    }

    fn table_columns(&self, table: &str) -> GraphResult<Vec<ColumnRow>> {
        let tables = self.tables.read();
        Ok(tables
            .iter()
            .filter(|t| t.matches(table))
            .flat_map(|t| t.column_rows())
            .collect())
    }
}
