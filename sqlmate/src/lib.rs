// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQLMate - schema graph and automatic join-path SQL compiler
//!
//! SQLMate introspects the foreign keys of a relational schema into an
//! in-memory graph and compiles table/column-level requests into SQL,
//! inserting the JOINs that connect every referenced table.
//!
//! # Features
//!
//! - **Schema Graph**: Bidirectional foreign-key graph built once at startup
//! - **Canonical Types**: Vendor column types folded into INT, FLOAT, STR, DATE and BOOL
//! - **Join Discovery**: Hop-minimal join paths by breadth-first search
//! - **Typed Compilation**: SELECT/UPDATE plans rendered with bound parameters
//! - **Schema Manifest**: `db_schema.json` for the query-builder frontend
//!
//! # Usage
//!
//! ```no_run
//! use sqlmate::{QueryOptions, QuerySelection, SchemaCoordinator, SnapshotIntrospector, SqlMateConfig};
//! use std::sync::Arc;
//!
//! let introspector = Arc::new(SnapshotIntrospector::from_json_file("shop.json")?);
//! let coordinator = SchemaCoordinator::startup(SqlMateConfig::from_env()?, introspector)?;
//!
//! let query = coordinator.compile_query(
//!     &[QuerySelection::new("orders", "total"), QuerySelection::new("customers", "name")],
//!     &QueryOptions::default(),
//! )?;
//! println!("{}", query.sql());
//! # Ok::<(), sqlmate::SqlMateError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod exec;
pub mod plan;
pub mod types;

pub use catalog::{
    Edge, GraphError, GraphResult, Introspector, SchemaGraph, SchemaManifest, SnapshotIntrospector,
    SnapshotTable,
};
pub use config::{Dialect, JoinStrategy, ParamStyle, SchemaScope, SqlMateConfig};
pub use coordinator::{ErrorKind, QueryTable, SchemaCoordinator, SqlMateError, SqlMateResult};
pub use exec::{ExecutionError, QueryOutput, SqlExecutor};
pub use plan::{
    CompileError, CompiledQuery, CompiledStatement, CompiledUpdate, JoinPathResolver, Predicate,
    QueryCompiler, QueryOptions, QueryRequest, QuerySelection, SqlValue, UpdateCompiler, UpdateSpec,
};
pub use types::{normalize, CanonicalType};

/// SQLMate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SQLMate crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
