// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL text rendering
//!
//! Identifiers reaching this stage have already been validated; literal
//! values are either bound as named parameters or quoted according to their
//! canonical type.

use super::ir::{Comparison, Condition, ConditionKind, SelectPlan, UpdatePlan};
use super::value::SqlValue;
use crate::config::{Dialect, ParamStyle, SqlMateConfig};
use crate::types::CanonicalType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain decimal literal, safe to emit unquoted
static NUMERIC_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid numeric pattern"));

/// MySQL has no bare OFFSET; this is its documented "all rows" limit
const MYSQL_MAX_LIMIT: &str = "18446744073709551615";

/// Literal bound to a `:name` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundParam {
    pub name: String,
    pub value: SqlValue,
}

/// Final statement handed to the execution collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledStatement {
    pub sql: String,
    pub params: Vec<BoundParam>,
}

impl CompiledStatement {
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Renders IR plans into SQL for one dialect and parameter style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlRenderer {
    style: ParamStyle,
    dialect: Dialect,
}

/// Collects bound parameters while a statement is being rendered
struct Literals {
    style: ParamStyle,
    dialect: Dialect,
    params: Vec<BoundParam>,
}

impl Literals {
    fn push(&mut self, value: &SqlValue, value_type: CanonicalType) -> String {
        if value.is_null() {
            return "NULL".to_string();
        }
        match self.style {
            ParamStyle::Named => {
                let name = format!("p{}", self.params.len() + 1);
                let placeholder = format!(":{}", name);
                self.params.push(BoundParam {
                    name,
                    value: value.clone(),
                });
                placeholder
            }
            ParamStyle::Inline => inline_literal(value, value_type, self.dialect),
        }
    }

    fn condition(&mut self, condition: &Condition) -> String {
        let target = &condition.target;
        let ty = condition.value_type;
        match &condition.kind {
            // patterns are always text
            ConditionKind::Compare {
                op: Comparison::Like,
                value,
            } => format!("{} LIKE {}", target, self.push(value, CanonicalType::Str)),
            ConditionKind::Compare { op, value } => {
                format!("{} {} {}", target, op.symbol(), self.push(value, ty))
            }
            ConditionKind::Between { low, high } => {
                let low = self.push(low, ty);
                let high = self.push(high, ty);
                format!("{} BETWEEN {} AND {}", target, low, high)
            }
            ConditionKind::InList(values) => {
                let rendered: Vec<String> = values.iter().map(|v| self.push(v, ty)).collect();
                format!("{} IN ({})", target, rendered.join(", "))
            }
            ConditionKind::IsNull => format!("{} IS NULL", target),
            ConditionKind::IsNotNull => format!("{} IS NOT NULL", target),
            ConditionKind::AlwaysFalse => "1 = 0".to_string(),
        }
    }

    fn conjunction(&mut self, conditions: &[Condition]) -> String {
        conditions
            .iter()
            .map(|c| self.condition(c))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    fn finish(self, sql: String) -> CompiledStatement {
        CompiledStatement {
            sql,
            params: self.params,
        }
    }
}

/// Type-aware inline literal
///
/// Numbers and booleans are bare unless the column is STR or DATE. Text is
/// quoted, except against an UNKNOWN column when it is a plain decimal
/// number; any other UNKNOWN text stays quoted so it cannot escape the
/// literal.
fn inline_literal(value: &SqlValue, value_type: CanonicalType, dialect: Dialect) -> String {
    let bare = match value {
        SqlValue::Null => return "NULL".to_string(),
        SqlValue::Text(s) if value_type == CanonicalType::Unknown && NUMERIC_TEXT.is_match(s) => {
            return s.clone();
        }
        SqlValue::Text(s) => return quote(s, dialect),
        SqlValue::Bool(true) => "TRUE".to_string(),
        SqlValue::Bool(false) => "FALSE".to_string(),
        SqlValue::Int(i) => i.to_string(),
        SqlValue::Float(f) => f.to_string(),
    };
    if value_type.is_quoted() {
        quote(&bare, dialect)
    } else {
        bare
    }
}

/// Single-quoted string literal
pub fn quote(text: &str, dialect: Dialect) -> String {
    let escaped = match dialect {
        Dialect::Mysql => text.replace('\\', "\\\\").replace('\'', "''"),
        Dialect::Postgres => text.replace('\'', "''"),
    };
    format!("'{}'", escaped)
}

impl SqlRenderer {
    pub fn new(style: ParamStyle, dialect: Dialect) -> Self {
        Self { style, dialect }
    }

    pub fn from_config(config: &SqlMateConfig) -> Self {
        Self::new(config.param_style, config.dialect)
    }

    fn literals(&self) -> Literals {
        Literals {
            style: self.style,
            dialect: self.dialect,
            params: Vec::new(),
        }
    }

    pub fn render_select(&self, plan: &SelectPlan) -> CompiledStatement {
        let mut literals = self.literals();
        let mut sql = String::from("SELECT ");
        if plan.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(
            &plan
                .items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        );

        sql.push_str(" FROM ");
        sql.push_str(&plan.from.anchor);
        for join in &plan.from.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        if !plan.where_clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&literals.conjunction(&plan.where_clause));
        }

        if !plan.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(
                &plan
                    .group_by
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        if !plan.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&literals.conjunction(&plan.having));
        }

        if !plan.order_by.is_empty() {
            let items: Vec<String> = plan
                .order_by
                .iter()
                .map(|item| format!("{} {}", item.column, if item.descending { "DESC" } else { "ASC" }))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&items.join(", "));
        }

        match (plan.limit, plan.offset, self.dialect) {
            (Some(limit), _, _) => sql.push_str(&format!(" LIMIT {}", limit)),
            (None, Some(_), Dialect::Mysql) => sql.push_str(&format!(" LIMIT {}", MYSQL_MAX_LIMIT)),
            _ => {}
        }
        if let Some(offset) = plan.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        literals.finish(sql)
    }

    pub fn render_update(&self, plan: &UpdatePlan) -> CompiledStatement {
        let mut literals = self.literals();
        let assignments: Vec<String> = plan
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.column, literals.push(&a.value, a.value_type)))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", plan.table, assignments.join(", "));
        if !plan.where_clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&literals.conjunction(&plan.where_clause));
        }

        literals.finish(sql)
    }
}
