// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed SQL intermediate representation
//!
//! Compilers produce these clause lists; [`super::render::SqlRenderer`] turns
//! them into text. Literal values stay as [`SqlValue`]s until rendering so the
//! renderer can bind them as parameters or quote them inline.

use super::error::CompileResult;
use super::request::Predicate;
use super::value::SqlValue;
use crate::catalog::Edge;
use crate::types::CanonicalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Table-qualified column reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregate {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }

    /// Type of the aggregate's result given the type of its argument
    pub fn result_type(&self, argument: CanonicalType) -> CanonicalType {
        match self {
            Aggregate::Count => CanonicalType::Int,
            Aggregate::Avg => CanonicalType::Float,
            Aggregate::Sum | Aggregate::Min | Aggregate::Max => argument,
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Column(ColumnRef),
    Aggregate(Aggregate, ColumnRef),
}

impl Expr {
    pub fn column(&self) -> &ColumnRef {
        match self {
            Expr::Column(column) | Expr::Aggregate(_, column) => column,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Expr::Aggregate(..))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(column) => write!(f, "{}", column),
            Expr::Aggregate(aggregate, column) => write!(f, "{}({})", aggregate, column),
        }
    }
}

/// One `JOIN <table> ON <predicate>` hop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStep {
    pub table: String,
    pub edge: Edge,
}

impl JoinStep {
    pub fn new(edge: Edge) -> Self {
        Self {
            table: edge.destination.clone(),
            edge,
        }
    }
}

impl fmt::Display for JoinStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JOIN {} ON {}", self.table, self.edge)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    pub anchor: String,
    pub joins: Vec<JoinStep>,
}

impl FromClause {
    pub fn new(anchor: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
            joins: Vec::new(),
        }
    }

    /// Anchor followed by every joined table, in join order
    pub fn tables(&self) -> Vec<String> {
        std::iter::once(self.anchor.clone())
            .chain(self.joins.iter().map(|step| step.table.clone()))
            .collect()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.anchor == table || self.joins.iter().any(|step| step.table == table)
    }

    /// Join steps rendered and separated by single spaces
    pub fn join_clause(&self) -> String {
        self.joins
            .iter()
            .map(JoinStep::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NotEq => "<>",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Like => "LIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    Compare { op: Comparison, value: SqlValue },
    Between { low: SqlValue, high: SqlValue },
    InList(Vec<SqlValue>),
    IsNull,
    IsNotNull,
    /// Statically false, e.g. an empty IN list
    AlwaysFalse,
}

/// A single predicate over one expression
///
/// `target` is already-validated SQL text: a qualified column, an aggregate
/// call, or a bare column inside an UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub target: String,
    pub kind: ConditionKind,
    /// Canonical type the literals were coerced to
    pub value_type: CanonicalType,
}

impl Condition {
    /// Lower a request predicate, coercing its literals to `value_type`
    ///
    /// Equality with NULL becomes `IS NULL` / `IS NOT NULL`.
    pub fn from_predicate(
        target: String,
        predicate: &Predicate,
        value_type: CanonicalType,
    ) -> CompileResult<Self> {
        let coerce = |value: &SqlValue| value.coerce(&target, value_type);
        let compare = |op: Comparison, value: &SqlValue| -> CompileResult<ConditionKind> {
            Ok(ConditionKind::Compare {
                op,
                value: coerce(value)?,
            })
        };

        let kind = match predicate {
            Predicate::Eq { value } if value.is_null() => ConditionKind::IsNull,
            Predicate::NotEq { value } if value.is_null() => ConditionKind::IsNotNull,
            Predicate::Eq { value } => compare(Comparison::Eq, value)?,
            Predicate::NotEq { value } => compare(Comparison::NotEq, value)?,
            Predicate::Lt { value } => compare(Comparison::Lt, value)?,
            Predicate::Le { value } => compare(Comparison::Le, value)?,
            Predicate::Gt { value } => compare(Comparison::Gt, value)?,
            Predicate::Ge { value } => compare(Comparison::Ge, value)?,
            Predicate::Between { low, high } => ConditionKind::Between {
                low: coerce(low)?,
                high: coerce(high)?,
            },
            Predicate::In { values } if values.is_empty() => ConditionKind::AlwaysFalse,
            Predicate::In { values } => {
                ConditionKind::InList(values.iter().map(coerce).collect::<CompileResult<_>>()?)
            }
            // patterns are matched as text whatever the column type
            Predicate::Like { pattern } => ConditionKind::Compare {
                op: Comparison::Like,
                value: SqlValue::text(pattern.as_str()),
            },
            Predicate::IsNull => ConditionKind::IsNull,
            Predicate::IsNotNull => ConditionKind::IsNotNull,
        };

        Ok(Self {
            target,
            kind,
            value_type,
        })
    }

    pub fn is_always_false(&self) -> bool {
        matches!(self.kind, ConditionKind::AlwaysFalse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub column: ColumnRef,
    pub descending: bool,
}

/// Structured SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectPlan {
    pub distinct: bool,
    pub items: Vec<Expr>,
    pub from: FromClause,
    pub where_clause: Vec<Condition>,
    pub group_by: Vec<ColumnRef>,
    pub having: Vec<Condition>,
    pub order_by: Vec<OrderItem>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectPlan {
    pub fn new(from: FromClause) -> Self {
        Self {
            distinct: false,
            items: Vec::new(),
            from,
            where_clause: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: SqlValue,
    pub value_type: CanonicalType,
}

/// Structured single-table UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub where_clause: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::error::CompileError;

    #[test]
    fn test_expr_display() {
        let column = ColumnRef::new("orders", "total");
        assert_eq!(Expr::Column(column.clone()).to_string(), "orders.total");
        assert_eq!(Expr::Aggregate(Aggregate::Sum, column).to_string(), "SUM(orders.total)");
    }

    #[test]
    fn test_from_clause_tables() {
        let mut from = FromClause::new("orders");
        from.joins.push(JoinStep::new(Edge::new("orders", "customers", "customer_id", "id")));

        assert_eq!(from.tables(), vec!["orders".to_string(), "customers".to_string()]);
        assert!(from.contains("customers"));
        assert!(!from.contains("products"));
        assert_eq!(from.join_clause(), "JOIN customers ON orders.customer_id=customers.id");
    }

    #[test]
    fn test_condition_null_equality() {
        let condition =
            Condition::from_predicate("t.c".into(), &Predicate::eq(SqlValue::Null), CanonicalType::Int)
                .unwrap();
        assert_eq!(condition.kind, ConditionKind::IsNull);
    }

    #[test]
    fn test_condition_coerces_literals() {
        let condition =
            Condition::from_predicate("orders.id".into(), &Predicate::gt("10"), CanonicalType::Int).unwrap();
        assert_eq!(
            condition.kind,
            ConditionKind::Compare {
                op: Comparison::Gt,
                value: SqlValue::Int(10)
            }
        );

        let err = Condition::from_predicate("orders.id".into(), &Predicate::gt("ten"), CanonicalType::Int)
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidLiteral { .. }));
    }

    #[test]
    fn test_empty_in_list_is_always_false() {
        let values: Vec<i64> = Vec::new();
        let condition =
            Condition::from_predicate("t.c".into(), &Predicate::is_in(values), CanonicalType::Int).unwrap();
        assert!(condition.is_always_false());
    }

    #[test]
    fn test_aggregate_result_types() {
        assert_eq!(Aggregate::Count.result_type(CanonicalType::Str), CanonicalType::Int);
        assert_eq!(Aggregate::Avg.result_type(CanonicalType::Int), CanonicalType::Float);
        assert_eq!(Aggregate::Max.result_type(CanonicalType::Date), CanonicalType::Date);
    }
}
