// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query and update request payloads
//!
//! These mirror the JSON the HTTP layer receives. They carry table and
//! column names plus predicate payloads; nothing here touches the graph.

use super::ir::{Aggregate, ColumnRef};
use super::value::SqlValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparison applied to one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    Eq { value: SqlValue },
    NotEq { value: SqlValue },
    Lt { value: SqlValue },
    Le { value: SqlValue },
    Gt { value: SqlValue },
    Ge { value: SqlValue },
    Between { low: SqlValue, high: SqlValue },
    In { values: Vec<SqlValue> },
    Like { pattern: String },
    IsNull,
    IsNotNull,
}

impl Predicate {
    pub fn eq(value: impl Into<SqlValue>) -> Self {
        Predicate::Eq { value: value.into() }
    }

    pub fn gt(value: impl Into<SqlValue>) -> Self {
        Predicate::Gt { value: value.into() }
    }

    pub fn lt(value: impl Into<SqlValue>) -> Self {
        Predicate::Lt { value: value.into() }
    }

    pub fn is_in<V: Into<SqlValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

fn default_project() -> bool {
    true
}

/// One column the caller wants projected, filtered, or both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySelection {
    pub table: String,
    pub column: String,
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
    #[serde(default)]
    pub filters: Vec<Predicate>,
    /// When false the column only contributes filters
    #[serde(default = "default_project")]
    pub project: bool,
}

impl QuerySelection {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            aggregate: None,
            filters: Vec::new(),
            project: true,
        }
    }

    pub fn with_filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn aggregated(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Filter-only selection
    pub fn hidden(mut self) -> Self {
        self.project = false;
        self
    }

    pub fn column_ref(&self) -> ColumnRef {
        ColumnRef::new(&self.table, &self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub table: String,
    pub column: String,
    #[serde(default)]
    pub descending: bool,
}

/// Free-form query options
///
/// Unrecognized keys are kept in `extra` so the caller's payload survives a
/// round trip; the compiler ignores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub distinct: bool,
    pub group_by: Vec<ColumnRef>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Full query payload: selections in order plus options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub selections: Vec<QuerySelection>,
    #[serde(default)]
    pub options: QueryOptions,
}

/// Filter on the update target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFilter {
    pub column: String,
    pub predicate: Predicate,
}

/// UPDATE request against one user-owned table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSpec {
    pub table: String,
    pub assignments: BTreeMap<String, SqlValue>,
    #[serde(default)]
    pub filters: Vec<UpdateFilter>,
}

impl UpdateSpec {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            assignments: BTreeMap::new(),
            filters: Vec::new(),
        }
    }

    pub fn set(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.assignments.insert(column.to_string(), value.into());
        self
    }

    pub fn filter(mut self, column: &str, predicate: Predicate) -> Self {
        self.filters.push(UpdateFilter {
            column: column.to_string(),
            predicate,
        });
        self
    }
}
