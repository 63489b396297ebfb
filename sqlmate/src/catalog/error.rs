// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the schema graph

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// Startup introspection failed; the service must not run on a partial graph
    #[error("Schema graph build failed: {0}")]
    GraphBuildFailure(String),

    #[error("Introspection failed: {0}")]
    Introspection(String),

    #[error("No path found between {from} and {to}")]
    NoJoinPath { from: String, to: String },

    #[error("No edge found between {from} and {to}")]
    NoDirectEdge { from: String, to: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GraphError {
    pub fn introspection(message: impl Into<String>) -> Self {
        GraphError::Introspection(message.into())
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
