//! Test utilities for SQLMate integration tests
//!
//! - TestFixture: coordinator over the `fixtures/shop.json` snapshot with a
//!   recording executor attached

#![allow(dead_code)]

pub mod test_fixture;
