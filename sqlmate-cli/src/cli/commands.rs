// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sqlmate")]
#[command(about = "Schema graph and automatic join-path SQL compiler")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// JSON configuration file; environment variables are used otherwise
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print tables, foreign-key edges and connected components
    Graph {
        /// Introspection snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,
    },

    /// Resolve the JOIN clause between two tables
    Join {
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Source table
        from: String,

        /// Destination table
        to: String,
    },

    /// Compile a query request into SQL
    Query {
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Query request (JSON with `selections` and `options`)
        #[arg(long, value_name = "FILE")]
        request: PathBuf,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Compile an update request into SQL
    Update {
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Update request (JSON with `table`, `assignments` and `filters`)
        #[arg(long, value_name = "FILE")]
        request: PathBuf,

        /// Require the target to belong to this user
        #[arg(long, value_name = "NAME")]
        user: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the schema manifest, or write db_schema.json into a directory
    Manifest {
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
