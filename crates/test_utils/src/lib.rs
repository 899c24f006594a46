//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! crew management test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built crew members, requests and reference ids
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for service errors and pages
//! - `generators`: Property-based and fake data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
