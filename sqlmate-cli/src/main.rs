// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQLMate CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::output::ResultFormatter;
use cli::{Cli, Commands};

fn main() {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Version => {
            println!("{} {}", "SQLMate".bold().green(), sqlmate::VERSION);
            println!("Schema graph and automatic join-path SQL compiler");
            Ok(())
        }

        Commands::Graph { snapshot } => cli::handle_graph(config, snapshot),

        Commands::Join { snapshot, from, to } => cli::handle_join(config, snapshot, from, to),

        Commands::Query {
            snapshot,
            request,
            format,
        } => cli::handle_query(config, snapshot, request, *format),

        Commands::Update {
            snapshot,
            request,
            user,
            format,
        } => cli::handle_update(config, snapshot, request, user.as_deref(), *format),

        Commands::Manifest { snapshot, out } => cli::handle_manifest(config, snapshot, out.as_deref()),
    };

    if let Err(err) = result {
        eprintln!("{}", ResultFormatter::format_error(&err));
        std::process::exit(1);
    }
}
