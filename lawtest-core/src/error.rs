//! Error types for the lawtest core library.
//!
//! Generator and configuration errors are raised at construction time so a
//! broken generator or config never reaches a checker. [`LawError`] carries
//! the outcome of a failed check, including the literal counterexample.

use std::{fmt, io, time::Duration};

use thiserror::Error;

use crate::{
    law::Law,
    report::{StructureReport, Violation, WorkerFault},
};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while constructing a generator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeneratorError {
    /// The lower bound exceeded the upper bound.
    #[error("generator range is inverted: min ({min}) must be <= max ({max})")]
    InvertedRange {
        /// Rendered lower bound supplied by the caller.
        min: String,
        /// Rendered upper bound supplied by the caller.
        max: String,
    },
    /// A floating-point bound, or the span between bounds, was not finite.
    #[error("generator bound `{bound}` must be finite")]
    NonFiniteBound {
        /// Rendered offending value.
        bound: String,
    },
    /// A choice generator was constructed without any values.
    #[error("cannot choose from an empty set of values")]
    EmptyChoice,
}

define_error_codes! {
    /// Stable codes describing [`GeneratorError`] variants.
    enum GeneratorErrorCode for GeneratorError {
        /// The lower bound exceeded the upper bound.
        InvertedRange => InvertedRange { .. } => "GENERATOR_INVERTED_RANGE",
        /// A bound was not finite.
        NonFiniteBound => NonFiniteBound { .. } => "GENERATOR_NON_FINITE_BOUND",
        /// A choice generator had nothing to choose from.
        EmptyChoice => EmptyChoice => "GENERATOR_EMPTY_CHOICE",
    }
}

/// An error produced while building a [`crate::Config`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// Checks must run at least one trial.
    #[error("test_cases must be at least 1 (got 0)")]
    ZeroTestCases,
    /// A zero timeout would fail every check before its first trial.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// Checks must run at least one trial.
        ZeroTestCases => ZeroTestCases => "CONFIG_ZERO_TEST_CASES",
        /// The timeout was zero.
        ZeroTimeout => ZeroTimeout => "CONFIG_ZERO_TIMEOUT",
    }
}

/// Outcome of a failed check.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LawError {
    /// A single counterexample falsified the law.
    #[error("{violation}")]
    Violated {
        /// The counterexample together with its trial and seed.
        violation: Box<Violation>,
    },
    /// Concurrent workers produced one or more counterexamples.
    #[error(
        "{law} violated under concurrency ({} counterexample(s), seed {seed}){}",
        .violations.len(),
        render_list(.violations)
    )]
    ConcurrentViolations {
        /// Law checked by the workers.
        law: Law,
        /// Seed the workers derived their generators from.
        seed: u64,
        /// Collected counterexamples, bounded by the checker.
        violations: Vec<Violation>,
    },
    /// At least one worker faulted or diverged from its siblings.
    #[error(
        "{law} failed: {} of {workers} worker(s) faulted (seed {seed}){}",
        .faults.len(),
        render_list(.faults)
    )]
    NotParallelSafe {
        /// Law checked by the workers.
        law: Law,
        /// Number of workers launched.
        workers: usize,
        /// Seed used to build the shared input pool.
        seed: u64,
        /// Every recorded fault, in worker order.
        faults: Vec<WorkerFault>,
    },
    /// The configured timeout elapsed before all trials completed.
    #[error("{law} check timed out after {completed} of {requested} trial(s) (limit {timeout:?})")]
    TimedOut {
        /// Law being checked when the deadline passed.
        law: Law,
        /// Trials finished before the deadline.
        completed: usize,
        /// Trials requested by the configuration.
        requested: usize,
        /// Configured timeout.
        timeout: Duration,
    },
    /// Concurrency checks need at least one worker.
    #[error("worker count must be at least 1 (got {workers})")]
    InvalidWorkerCount {
        /// Worker count supplied by the caller.
        workers: usize,
    },
    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    WorkerSpawn {
        /// Index of the worker that could not be started.
        worker: usize,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
    /// One or more sub-checks of a composite verification failed.
    ///
    /// Every sub-check runs, so `failures` lists each rejected law in
    /// execution order and `report` holds the ones that passed.
    #[error(
        "{} rejected: {} sub-check(s) failed, {} passed{}",
        .report.structure(),
        .failures.len(),
        .report.checks().len(),
        render_list(.failures)
    )]
    Rejected {
        /// Sub-checks that passed.
        report: StructureReport,
        /// Failing sub-checks, never empty.
        failures: Vec<LawError>,
    },
}

define_error_codes! {
    /// Stable codes describing [`LawError`] variants.
    enum LawErrorCode for LawError {
        /// A single counterexample falsified the law.
        Violated => Violated { .. } => "LAW_VIOLATED",
        /// Concurrent workers produced counterexamples.
        ConcurrentViolations => ConcurrentViolations { .. } => "LAW_CONCURRENT_VIOLATIONS",
        /// A worker faulted or diverged.
        NotParallelSafe => NotParallelSafe { .. } => "LAW_NOT_PARALLEL_SAFE",
        /// The configured timeout elapsed.
        TimedOut => TimedOut { .. } => "LAW_TIMED_OUT",
        /// The worker count was zero.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "LAW_INVALID_WORKER_COUNT",
        /// A worker thread could not be spawned.
        WorkerSpawn => WorkerSpawn { .. } => "LAW_WORKER_SPAWN",
        /// Sub-checks of a composite verification failed.
        Rejected => Rejected { .. } => "LAW_REJECTED",
    }
}

impl LawError {
    pub(crate) fn violated(violation: Violation) -> Self {
        Self::Violated {
            violation: Box::new(violation),
        }
    }

    /// Returns the law whose check failed, when the failure is tied to one.
    ///
    /// For [`LawError::Rejected`] this is the first failing sub-check.
    #[must_use]
    pub fn law(&self) -> Option<Law> {
        match self {
            Self::Violated { violation } => Some(violation.law()),
            Self::ConcurrentViolations { law, .. }
            | Self::NotParallelSafe { law, .. }
            | Self::TimedOut { law, .. } => Some(*law),
            Self::Rejected { failures, .. } => failures.first().and_then(Self::law),
            Self::InvalidWorkerCount { .. } | Self::WorkerSpawn { .. } => None,
        }
    }

    /// Returns every failing law, in execution order.
    #[must_use]
    pub fn failed_laws(&self) -> Vec<Law> {
        match self {
            Self::Rejected { failures, .. } => {
                failures.iter().flat_map(Self::failed_laws).collect()
            }
            other => other.law().into_iter().collect(),
        }
    }

    /// Returns the first recorded counterexample, if any.
    #[must_use]
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violated { violation } => Some(violation),
            Self::ConcurrentViolations { violations, .. } => violations.first(),
            Self::Rejected { failures, .. } => failures.first().and_then(Self::violation),
            _ => None,
        }
    }
}

fn render_list<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("\n  - {item}")).collect()
}
