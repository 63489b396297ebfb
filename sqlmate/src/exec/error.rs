// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution error types

use thiserror::Error;

/// Failures reported by the execution collaborator
///
/// Compilation has already succeeded when one of these is raised; the
/// statement is never retried or rewritten.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("No executor configured")]
    NotConfigured,

    #[error("Malformed result: expected {expected} columns, row {row} has {actual}")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl ExecutionError {
    pub fn database(message: impl Into<String>) -> Self {
        ExecutionError::Database(message.into())
    }
}

pub type ExecResult<T> = Result<T, ExecutionError>;
