//! Shared test utilities for rlogs integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod builders;
pub mod fake_store;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_store::*;
pub use fixtures::*;
