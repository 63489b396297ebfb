// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement execution boundary
//!
//! Compiled statements leave the library through [`SqlExecutor`]; rows come
//! back as [`QueryOutput`].

pub mod error;
pub mod executor;
pub mod result;

pub use error::{ExecResult, ExecutionError};
pub use executor::SqlExecutor;
pub use result::QueryOutput;
