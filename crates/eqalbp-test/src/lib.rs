//! Shared test fixtures for EqALBP crates.
//!
//! This crate provides problem instances and pure helpers for testing.
//! It does NOT depend on `eqalbp-scoring` to avoid circular dependencies.
//!
//! - [`exemplar`] - the 10-task reference instance
//! - [`random`] - seeded random instances and move sequences
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! eqalbp-test = { workspace = true }
//! ```

pub mod exemplar;
pub mod random;

pub use exemplar::{exemplar_model, exemplar_stations};
pub use random::{arb_instance, random_instance, random_moves, Instance, InstanceShape};
