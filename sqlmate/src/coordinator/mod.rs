// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema Coordinator - central entry point for request handlers
//!
//! The SchemaCoordinator owns the schema graph and hands out compilers,
//! properly coordinating the introspection and execution collaborators.

pub mod error;
pub mod schema_coordinator;

pub use error::{ErrorKind, SqlMateError, SqlMateResult};
pub use schema_coordinator::{QueryTable, SchemaCoordinator};
