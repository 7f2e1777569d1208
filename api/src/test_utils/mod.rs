//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why a manual mock instead of mockall?
//! - The transport is scripted per URL, which reads better as data than as
//!   expectation chains
//! - The mock records every request so tests can assert what was (and was
//!   not) fetched

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
