//! Common test utilities for codegraph-rewrite
//!
//! Shared fixtures and fake ports for the integration tests.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

pub use fixtures::*;
