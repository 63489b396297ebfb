// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL compilation
//!
//! This module turns table/column-level requests into executable SQL. It
//! includes join path discovery over the schema graph, a typed statement
//! representation, and rendering with bound or inlined literals.

pub mod error;
pub mod identifier;
pub mod ir;
pub mod path;
pub mod query_compiler;
pub mod render;
pub mod request;
pub mod update_compiler;
pub mod value;

pub use error::{CompileError, CompileResult};
pub use identifier::{user_table_name, validate_column, validate_table};
pub use ir::{
    Aggregate, Assignment, ColumnRef, Comparison, Condition, ConditionKind, Expr, FromClause,
    JoinStep, OrderItem, SelectPlan, UpdatePlan,
};
pub use path::JoinPathResolver;
pub use query_compiler::{CompiledQuery, QueryCompiler};
pub use render::{BoundParam, CompiledStatement, SqlRenderer};
pub use request::{
    OrderBy, Predicate, QueryOptions, QueryRequest, QuerySelection, UpdateFilter, UpdateSpec,
};
pub use update_compiler::{CompiledUpdate, UpdateCompiler};
pub use value::SqlValue;
