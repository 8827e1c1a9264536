//! Shared test utilities for otail integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Transport helpers are deterministic under
//! `#[tokio::test(start_paused = true)]`.

pub mod assertions;
pub mod builders;
pub mod fake_connector;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_connector::*;
pub use fixtures::*;
