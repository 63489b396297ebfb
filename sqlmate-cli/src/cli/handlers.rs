// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers

use super::commands::OutputFormat;
use super::output::ResultFormatter;
use colored::Colorize;
use sqlmate::{
    JoinPathResolver, QueryRequest, SchemaCoordinator, SnapshotIntrospector, SqlMateConfig,
    SqlMateResult, UpdateSpec,
};
use std::path::Path;
use std::sync::Arc;

/// Configuration from `--config`, or from the environment when absent
fn load_config(config: Option<&Path>) -> SqlMateResult<SqlMateConfig> {
    match config {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            Ok(SqlMateConfig::from_json_file(path)?)
        }
        None => Ok(SqlMateConfig::from_env()?),
    }
}

/// Build a coordinator over a snapshot, with user tables restored
///
/// The configured `schema_dir` is only honored when `writes_manifest` is
/// set, so inspection commands never touch `db_schema.json`.
fn open(config: Option<&Path>, snapshot: &Path, writes_manifest: bool) -> SqlMateResult<SchemaCoordinator> {
    let mut config = load_config(config)?;
    if !writes_manifest {
        config.schema_dir = None;
    }
    let introspector = Arc::new(SnapshotIntrospector::from_json_file(snapshot)?);
    log::debug!(
        "Loaded snapshot {} ({} tables)",
        snapshot.display(),
        introspector.table_count()
    );

    let coordinator = SchemaCoordinator::startup(config, introspector)?;
    coordinator.restore_user_tables()?;
    Ok(coordinator)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> SqlMateResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn handle_graph(config: Option<&Path>, snapshot: &Path) -> SqlMateResult<()> {
    let coordinator = open(config, snapshot, false)?;
    print!("{}", ResultFormatter::format_graph(&coordinator.graph()));
    Ok(())
}

pub fn handle_join(config: Option<&Path>, snapshot: &Path, from: &str, to: &str) -> SqlMateResult<()> {
    let coordinator = open(config, snapshot, false)?;
    let graph = coordinator.graph();
    let clause = JoinPathResolver::new(&graph).find_join_clause(from, to)?;
    print!("{}", ResultFormatter::format_join(from, to, &clause));
    Ok(())
}

pub fn handle_query(
    config: Option<&Path>,
    snapshot: &Path,
    request: &Path,
    format: OutputFormat,
) -> SqlMateResult<()> {
    let coordinator = open(config, snapshot, false)?;
    let request: QueryRequest = read_json(request)?;
    let compiled = coordinator.compile_query(&request.selections, &request.options)?;
    print!("{}", ResultFormatter::format_query(&compiled, format));
    Ok(())
}

pub fn handle_update(
    config: Option<&Path>,
    snapshot: &Path,
    request: &Path,
    user: Option<&str>,
    format: OutputFormat,
) -> SqlMateResult<()> {
    let coordinator = open(config, snapshot, false)?;
    let spec: UpdateSpec = read_json(request)?;
    let compiled = match user {
        Some(user) => coordinator.compile_user_update(user, &spec)?,
        None => coordinator.compile_update(&spec)?,
    };
    print!("{}", ResultFormatter::format_update(compiled.as_ref(), format));
    Ok(())
}

pub fn handle_manifest(config: Option<&Path>, snapshot: &Path, out: Option<&Path>) -> SqlMateResult<()> {
    let coordinator = open(config, snapshot, true)?;
    match out {
        Some(dir) => {
            let path = coordinator.write_manifest(dir)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", coordinator.manifest().to_json_pretty()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmate::catalog::MANIFEST_FILE_NAME;
    use std::path::PathBuf;

    const SNAPSHOT: &str = r#"{"tables": [
        {"name": "customers", "columns": [{"name": "id", "type": "int"}]},
        {"name": "orders", "columns": [{"name": "customer_id", "type": "int"}],
         "foreign_keys": [{"column": "customer_id", "referenced_table": "customers", "referenced_column": "id"}]}
    ]}"#;

    /// Snapshot and config files in `dir`, with `schema_dir` pointing at `dir/schema`
    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
        let snapshot = dir.join("snapshot.json");
        std::fs::write(&snapshot, SNAPSHOT).unwrap();

        let schema_dir = dir.join("schema");
        let config = dir.join("config.json");
        let body = serde_json::json!({ "schema_dir": schema_dir });
        std::fs::write(&config, body.to_string()).unwrap();

        (snapshot, config, schema_dir)
    }

    #[test]
    fn test_inspection_commands_leave_manifest_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (snapshot, config, schema_dir) = write_inputs(dir.path());

        handle_graph(Some(&config), &snapshot).unwrap();
        handle_join(Some(&config), &snapshot, "orders", "customers").unwrap();

        assert!(!schema_dir.join(MANIFEST_FILE_NAME).exists());
    }

    #[test]
    fn test_manifest_command_writes_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (snapshot, config, schema_dir) = write_inputs(dir.path());

        handle_manifest(Some(&config), &snapshot, None).unwrap();

        assert!(schema_dir.join(MANIFEST_FILE_NAME).exists());
    }
}
