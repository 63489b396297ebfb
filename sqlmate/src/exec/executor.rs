// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution collaborator boundary
//!
//! The library never opens database connections. A caller hands the
//! coordinator an implementation of [`SqlExecutor`] backed by its own driver
//! and pool; cancellation and timeouts belong to that implementation.

use super::error::ExecResult;
use super::result::QueryOutput;
use crate::plan::CompiledStatement;

/// Runs compiled statements against the database
pub trait SqlExecutor: Send + Sync {
    /// Run a SELECT and return its rows
    fn execute(&self, statement: &CompiledStatement) -> ExecResult<QueryOutput>;

    /// Run an UPDATE and return the number of affected rows
    fn execute_update(&self, statement: &CompiledStatement) -> ExecResult<u64>;
}
