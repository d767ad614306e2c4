//! Benchmark parameter types.
//!
//! Each type renders as the Criterion parameter label, so report directories
//! stay stable across runs.

use std::fmt;

/// Parameters for a sequential law check.
#[derive(Clone, Copy, Debug)]
pub struct CheckBenchParams {
    /// Trials per check.
    pub cases: usize,
}

impl fmt::Display for CheckBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cases={}", self.cases)
    }
}

/// Parameters for a concurrency check.
#[derive(Clone, Copy, Debug)]
pub struct ParallelBenchParams {
    /// Applications or trials shared across the workers.
    pub cases: usize,
    /// Worker threads spawned per check.
    pub workers: usize,
}

impl fmt::Display for ParallelBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cases={},workers={}", self.cases, self.workers)
    }
}
