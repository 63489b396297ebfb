//! Test fixture for SQLMate integration tests
//!
//! Builds a coordinator using ONLY the public API, backed by the shop
//! snapshot and an executor that records statements instead of running them.

use parking_lot::Mutex;
use serde_json::json;
use sqlmate::exec::ExecResult;
use sqlmate::{
    CompiledStatement, QueryOutput, SchemaCoordinator, SnapshotIntrospector, SqlExecutor,
    SqlMateConfig,
};
use std::path::PathBuf;
use std::sync::{Arc, Once};

static LOGGER: Once = Once::new();

/// Route library logs through env_logger in test mode
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn shop_snapshot() -> Arc<SnapshotIntrospector> {
    Arc::new(
        SnapshotIntrospector::from_json_file(fixture_path("shop.json"))
            .expect("Failed to load shop snapshot"),
    )
}

/// Executor that records every statement and answers with canned rows
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<CompiledStatement>>,
    affected_rows: u64,
}

impl RecordingExecutor {
    pub fn affecting(rows: u64) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            affected_rows: rows,
        }
    }

    pub fn statements(&self) -> Vec<CompiledStatement> {
        self.statements.lock().clone()
    }
}

impl SqlExecutor for RecordingExecutor {
    fn execute(&self, statement: &CompiledStatement) -> ExecResult<QueryOutput> {
        self.statements.lock().push(statement.clone());
        Ok(QueryOutput::new(vec!["col".to_string()]).with_row(vec![json!(1)]))
    }

    fn execute_update(&self, statement: &CompiledStatement) -> ExecResult<u64> {
        self.statements.lock().push(statement.clone());
        Ok(self.affected_rows)
    }
}

/// Coordinator plus the pieces tests want to poke at
pub struct TestFixture {
    pub coordinator: SchemaCoordinator,
    pub introspector: Arc<SnapshotIntrospector>,
    pub executor: Arc<RecordingExecutor>,
}

impl TestFixture {
    /// Shop schema with the default configuration
    pub fn new() -> Self {
        Self::with_config(SqlMateConfig::default())
    }

    pub fn with_config(config: SqlMateConfig) -> Self {
        init_logging();
        let introspector = shop_snapshot();
        let executor = Arc::new(RecordingExecutor::affecting(1));
        let coordinator = SchemaCoordinator::startup(config, introspector.clone())
            .expect("Failed to start coordinator")
            .with_executor(executor.clone());

        Self {
            coordinator,
            introspector,
            executor,
        }
    }
}
