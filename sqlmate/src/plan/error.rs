// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for SQL compilation

use crate::catalog::GraphError;
use crate::types::CanonicalType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    /// Two referenced tables are not connected in the schema graph
    #[error("{0}")]
    NoJoinPath(#[from] GraphError),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("No query selections provided")]
    EmptySelection,

    #[error("No assignments provided for update of {0}")]
    EmptyAssignment(String),

    #[error("Invalid literal for {column}: expected {expected}, got {value}")]
    InvalidLiteral {
        column: String,
        expected: CanonicalType,
        value: String,
    },
}

impl CompileError {
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        CompileError::InvalidIdentifier(message.into())
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
