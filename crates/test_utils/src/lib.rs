//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! utility allocation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common scenarios
//! - `builders`: Builder for a test building and the inputs derived from it
//! - `assertions`: Custom assertion helpers for allocation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
