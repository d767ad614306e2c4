//! Success and failure records produced by the checkers.
//!
//! Values are captured through their `Debug` rendering at the moment a law
//! fails, so reports stay `'static` and can travel inside [`crate::LawError`]
//! regardless of the operand type.

use std::fmt;

use crate::law::Law;

/// Named operand and result values that falsified a law.
///
/// # Examples
/// ```
/// use lawtest_core::{Checker, ConfigBuilder, int_range};
///
/// let config = ConfigBuilder::new().with_seed(7).build()?;
/// let values = int_range(-100_i64, 100)?;
/// let error = Checker::new(config)
///     .associative(|a: &i64, b: &i64| a - b, &values)
///     .expect_err("subtraction is not associative");
/// let violation = error.violation().expect("a counterexample is recorded");
/// assert!(violation.counterexample().get("a").is_some());
/// assert!(violation.counterexample().get("left").is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Counterexample {
    bindings: Vec<(&'static str, String)>,
}

impl Counterexample {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &'static str, value: &impl fmt::Debug) -> Self {
        self.bindings.push((name, format!("{value:?}")));
        self
    }

    /// Returns the rendered value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(name, rendered value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.bindings
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.bindings.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// A counterexample together with where it was found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    law: Law,
    statement: &'static str,
    trial: usize,
    seed: u64,
    counterexample: Counterexample,
}

impl Violation {
    pub(crate) fn new(
        law: Law,
        statement: &'static str,
        trial: usize,
        seed: u64,
        counterexample: Counterexample,
    ) -> Self {
        Self {
            law,
            statement,
            trial,
            seed,
            counterexample,
        }
    }

    /// Law the counterexample falsifies.
    #[must_use]
    pub fn law(&self) -> Law {
        self.law
    }

    /// The specific equation that failed, e.g. `e∘a = a`.
    #[must_use]
    pub fn statement(&self) -> &'static str {
        self.statement
    }

    /// Zero-based trial index at which the law failed.
    #[must_use]
    pub fn trial(&self) -> usize {
        self.trial
    }

    /// Seed that reproduces this run when passed to
    /// [`crate::ConfigBuilder::with_seed`].
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The literal operand and result values.
    #[must_use]
    pub fn counterexample(&self) -> &Counterexample {
        &self.counterexample
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed at trial {} (seed {}): expected {}\n  {}",
            self.law, self.trial, self.seed, self.statement, self.counterexample
        )
    }
}

/// Record of a law that held for every trial.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LawReport {
    law: Law,
    trials: usize,
    seed: u64,
}

impl LawReport {
    pub(crate) fn new(law: Law, trials: usize, seed: u64) -> Self {
        Self { law, trials, seed }
    }

    /// Law that was verified.
    #[must_use]
    pub fn law(&self) -> Law {
        self.law
    }

    /// Number of trials executed.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Seed the trials were drawn from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Sub-check reports for a verified algebraic structure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StructureReport {
    structure: &'static str,
    checks: Vec<LawReport>,
}

impl StructureReport {
    pub(crate) fn new(structure: &'static str) -> Self {
        Self {
            structure,
            checks: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, report: LawReport) {
        self.checks.push(report);
    }

    /// Structure kind, e.g. `"group"`.
    #[must_use]
    pub fn structure(&self) -> &'static str {
        self.structure
    }

    /// Reports for every sub-check, in execution order.
    #[must_use]
    pub fn checks(&self) -> &[LawReport] {
        &self.checks
    }

    /// Laws verified, in execution order.
    #[must_use]
    pub fn laws(&self) -> Vec<Law> {
        self.checks.iter().map(LawReport::law).collect()
    }
}

/// How a worker misbehaved during a concurrency check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FaultKind {
    /// The operation panicked on the worker thread.
    Panicked {
        /// Panic payload when it was a string, otherwise a placeholder.
        message: String,
    },
    /// The worker produced a result unequal to the reference worker's.
    Diverged {
        /// Index of the input pair that diverged.
        pair: usize,
        /// Rendered reference result.
        expected: String,
        /// Rendered result from this worker.
        actual: String,
    },
}

/// A fault recorded against a single worker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerFault {
    worker: usize,
    kind: FaultKind,
}

impl WorkerFault {
    pub(crate) fn new(worker: usize, kind: FaultKind) -> Self {
        Self { worker, kind }
    }

    /// Index of the faulting worker.
    #[must_use]
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }
}

impl fmt::Display for WorkerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FaultKind::Panicked { message } => {
                write!(f, "worker {} panicked: {message}", self.worker)
            }
            FaultKind::Diverged {
                pair,
                expected,
                actual,
            } => write!(
                f,
                "worker {} diverged on pair {pair}: expected={expected}, got={actual}",
                self.worker
            ),
        }
    }
}

/// Record of a concurrency check that completed cleanly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParallelReport {
    law: Law,
    workers: usize,
    applications: usize,
    seed: u64,
}

impl ParallelReport {
    pub(crate) fn new(law: Law, workers: usize, applications: usize, seed: u64) -> Self {
        Self {
            law,
            workers,
            applications,
            seed,
        }
    }

    /// Law that was verified.
    #[must_use]
    pub fn law(&self) -> Law {
        self.law
    }

    /// Workers launched.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Total operation applications (or trials) completed across workers.
    #[must_use]
    pub fn applications(&self) -> usize {
        self.applications
    }

    /// Seed the inputs were drawn from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
