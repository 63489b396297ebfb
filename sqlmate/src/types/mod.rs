// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Canonical column type system
//!
//! Vendor column types (`bigint`, `decimal(10,2)`, `timestamp with time zone`,
//! ...) are folded into a small set of canonical kinds. The compilers only
//! ever reason about these kinds, never about the raw vendor names.

pub mod canonical;
pub mod display;
pub mod registry;

pub use self::canonical::{normalize, CanonicalType};
pub use self::display::display_type;
pub use self::registry::{ColumnType, TableTypes};
