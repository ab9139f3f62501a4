//! Common test utilities for agency integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
