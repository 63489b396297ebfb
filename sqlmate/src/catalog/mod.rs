// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema catalog
//!
//! Introspects foreign-key relationships into an in-memory [`SchemaGraph`],
//! keeps per-table column types, and derives the schema manifest served to
//! the frontend.

pub mod edge;
pub mod error;
pub mod filter;
pub mod graph;
pub mod introspection;
pub mod manifest;

pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use filter::TableFilter;
pub use graph::{GraphStats, SchemaGraph};
pub use introspection::{
    ColumnRow, ForeignKeyRow, Introspector, SnapshotColumn, SnapshotIntrospector, SnapshotTable,
    TableRow,
};
pub use manifest::{ManifestColumn, ManifestTable, SchemaManifest, MANIFEST_FILE_NAME};
