// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema manifest (`db_schema.json`)
//!
//! Presentation-layer view of the shared schema consumed by the frontend.
//! Regenerated wholesale on every startup.

use super::error::GraphResult;
use super::filter::TableFilter;
use super::graph::SchemaGraph;
use crate::config::SqlMateConfig;
use crate::types::display_type;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "db_schema.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTable {
    pub table: String,
    pub columns: Vec<ManifestColumn>,
}

/// One entry per in-scope shared table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaManifest {
    pub tables: Vec<ManifestTable>,
}

impl SchemaManifest {
    /// Derive the manifest from the graph's type registry
    ///
    /// Per-user derived tables registered after startup are left out.
    pub fn from_graph(graph: &SchemaGraph, config: &SqlMateConfig) -> Self {
        let filter = TableFilter::new(config);
        let tables = graph
            .typed_tables()
            .into_iter()
            .filter(|(name, _)| filter.admits_key(name))
            .map(|(name, types)| ManifestTable {
                table: name,
                columns: types
                    .columns()
                    .iter()
                    .map(|c| ManifestColumn {
                        name: c.name.clone(),
                        type_name: display_type(&c.raw_type),
                    })
                    .collect(),
            })
            .collect();

        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&ManifestTable> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `db_schema.json` into `dir`, creating the directory if needed
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> GraphResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(MANIFEST_FILE_NAME);
        std::fs::write(&path, self.to_json_pretty()?)?;
        log::info!("Schema manifest written to {}", path.display());
        Ok(path)
    }
}
