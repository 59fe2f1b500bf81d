//! Shared test utilities for keyscout integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Fixtures that touch the filesystem live under a
//! `tempfile::TempDir` owned by the caller.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
