// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for SQLMate
//!
//! Drives the library against an introspection snapshot: inspect the graph,
//! resolve joins, compile requests and regenerate the schema manifest.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_graph, handle_join, handle_manifest, handle_query, handle_update};
