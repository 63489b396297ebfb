// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use super::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use sqlmate::plan::BoundParam;
use sqlmate::{CompiledQuery, CompiledUpdate, SchemaGraph, SqlMateError};

/// Result formatter for the supported output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Tables with their edges, followed by the connected components
    pub fn format_graph(graph: &SchemaGraph) -> String {
        let stats = graph.stats();
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Schema Graph".bold().green()));
        output.push_str(&format!(
            "Tables: {}  Foreign keys: {}  Components: {}\n\n",
            stats.tables, stats.foreign_keys, stats.components
        ));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Table").fg(Color::Green),
            Cell::new("Columns").fg(Color::Green),
            Cell::new("Joins").fg(Color::Green),
        ]);
        for name in graph.tables() {
            let columns = graph.table_types(name).map(|t| t.len()).unwrap_or(0);
            let joins: Vec<String> = graph.edges(name).iter().map(|e| e.to_string()).collect();
            table.add_row(vec![name.clone(), columns.to_string(), joins.join("\n")]);
        }
        output.push_str(&table.to_string());
        output.push('\n');

        let components = graph.connected_components();
        if components.len() > 1 {
            output.push_str(&format!(
                "\n{}\n",
                "Disconnected components (no join crosses them):".bold().yellow()
            ));
            for (i, component) in components.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, component.join(", ")));
            }
        }

        output
    }

    pub fn format_join(from: &str, to: &str, clause: &str) -> String {
        if clause.is_empty() {
            return format!("{}\n", format!("{} and {} are the same table", from, to).yellow());
        }
        format!("{}\n{}\n", format!("{} -> {}", from, to).bold().green(), clause)
    }

    pub fn format_query(query: &CompiledQuery, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => {
                let mut output = Self::format_sql("Compiled Query", &query.statement.sql, &query.statement.params);
                output.push_str(&format!("Selections: {}\n", query.selection_count));
                output
            }
            OutputFormat::Json => Self::to_json(serde_json::json!({
                "status": "success",
                "sql": query.statement.sql,
                "params": query.statement.params,
                "selection_count": query.selection_count,
            })),
        }
    }

    pub fn format_update(update: Option<&CompiledUpdate>, format: OutputFormat) -> String {
        match (update, format) {
            (None, OutputFormat::Table) => format!("{}\n", "Nothing to execute".yellow()),
            (None, OutputFormat::Json) => Self::to_json(serde_json::json!({
                "status": "success",
                "sql": null,
                "params": [],
            })),
            (Some(update), OutputFormat::Table) => {
                Self::format_sql("Compiled Update", &update.statement.sql, &update.statement.params)
            }
            (Some(update), OutputFormat::Json) => Self::to_json(serde_json::json!({
                "status": "success",
                "sql": update.statement.sql,
                "params": update.statement.params,
            })),
        }
    }

    pub fn format_error(error: &SqlMateError) -> String {
        format!("{} [{}]: {}", "Error".bold().red(), error.kind(), error)
    }

    fn format_sql(title: &str, sql: &str, params: &[BoundParam]) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", title.bold().green()));
        output.push_str(&format!("{}\n", sql));

        if !params.is_empty() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec![
                Cell::new("Parameter").fg(Color::Green),
                Cell::new("Value").fg(Color::Green),
            ]);
            for param in params {
                table.add_row(vec![format!(":{}", param.name), param.value.to_string()]);
            }
            output.push('\n');
            output.push_str(&table.to_string());
            output.push('\n');
        }
        output
    }

    fn to_json(value: serde_json::Value) -> String {
        let mut text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize result to JSON\"}".to_string()
        });
        text.push('\n');
        text
    }
}
