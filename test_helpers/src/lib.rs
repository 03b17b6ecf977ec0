//! Test helpers shared across crates in the workspace.
//!
//! Provides on-disk suite builders, `figment::Jail` wrappers for
//! environment isolation, and small text helpers for step parameters.

pub mod figment;
pub mod suite;
pub mod text;
