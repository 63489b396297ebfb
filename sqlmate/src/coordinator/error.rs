// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Top-level error type

use crate::catalog::GraphError;
use crate::config::ConfigError;
use crate::exec::ExecutionError;
use crate::plan::CompileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse failure class a caller maps to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    GraphBuild,
    NoJoinPath,
    InvalidIdentifier,
    /// No selections or no assignments
    EmptyInput,
    InvalidLiteral,
    Execution,
    Config,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::GraphBuild => "graph_build",
            ErrorKind::NoJoinPath => "no_join_path",
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::InvalidLiteral => "invalid_literal",
            ErrorKind::Execution => "execution",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum SqlMateError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SqlMateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlMateError::Graph(err) => graph_kind(err),
            SqlMateError::Compile(err) => match err {
                CompileError::NoJoinPath(inner) => graph_kind(inner),
                CompileError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
                CompileError::EmptySelection | CompileError::EmptyAssignment(_) => ErrorKind::EmptyInput,
                CompileError::InvalidLiteral { .. } => ErrorKind::InvalidLiteral,
            },
            SqlMateError::Execution(_) => ErrorKind::Execution,
            SqlMateError::Config(_) => ErrorKind::Config,
            SqlMateError::Io(_) | SqlMateError::Serialization(_) => ErrorKind::Io,
        }
    }
}

fn graph_kind(err: &GraphError) -> ErrorKind {
    match err {
        GraphError::GraphBuildFailure(_) | GraphError::Introspection(_) => ErrorKind::GraphBuild,
        GraphError::NoJoinPath { .. } | GraphError::NoDirectEdge { .. } => ErrorKind::NoJoinPath,
        GraphError::IoError(_) | GraphError::SerializationError(_) => ErrorKind::Io,
    }
}

pub type SqlMateResult<T> = Result<T, SqlMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let no_path: SqlMateError = CompileError::NoJoinPath(GraphError::NoJoinPath {
            from: "a".into(),
            to: "b".into(),
        })
        .into();
        let bad_name: SqlMateError = CompileError::invalid_identifier("table 'x y'").into();
        let empty: SqlMateError = CompileError::EmptySelection.into();
        let build: SqlMateError = GraphError::GraphBuildFailure("down".into()).into();
        let exec: SqlMateError = ExecutionError::database("syntax").into();

        assert_eq!(no_path.kind(), ErrorKind::NoJoinPath);
        assert_eq!(bad_name.kind(), ErrorKind::InvalidIdentifier);
        assert_eq!(empty.kind(), ErrorKind::EmptyInput);
        assert_eq!(build.kind(), ErrorKind::GraphBuild);
        assert_eq!(exec.kind(), ErrorKind::Execution);
        assert_eq!(no_path.to_string(), "No path found between a and b");
    }
}
