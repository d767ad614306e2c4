//! Benchmark support crate for lawtest.
//!
//! Provides the fixture structures and parameter types used by the Criterion
//! benchmarks for sequential law checks and the concurrency checkers.

pub mod fixtures;
pub mod params;
