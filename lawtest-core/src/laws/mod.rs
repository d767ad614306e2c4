//! The law-checking engine.
//!
//! A [`Checker`] runs `test_cases` independent trials per law, drawing fresh
//! inputs from a generator on every trial and stopping at the first
//! counterexample. The free functions in this module run the same checks
//! with [`Config::default`] and [`NativeEq`].

pub(crate) mod associativity;
mod closure;
mod commutativity;
mod idempotence;
mod identity;
mod inverse;

use std::{fmt, time::Instant};

use tracing::{info, info_span, warn};

pub use self::{
    associativity::associative, closure::closure, commutativity::commutative,
    idempotence::idempotent, identity::identity, inverse::inverse,
};
use crate::{
    config::Config,
    equality::NativeEq,
    error::LawError,
    generator::{LawRng, rng::rng_from_seed},
    law::Law,
    report::{Counterexample, LawReport, Violation},
    telemetry,
};

/// Runs law checks under a fixed [`Config`] and equality strategy.
///
/// # Examples
/// ```
/// use lawtest_core::{Checker, ConfigBuilder, int_range};
///
/// let config = ConfigBuilder::new().with_test_cases(250).build()?;
/// let checker = Checker::new(config);
/// let values = int_range(-100_i64, 100)?;
///
/// let report = checker.associative(|a: &i64, b: &i64| a + b, &values)?;
/// assert_eq!(report.trials(), 250);
/// checker.identity(|a: &i64, b: &i64| a + b, 0, &values)?;
/// checker.inverse(|a: &i64, b: &i64| a + b, |a: &i64| -a, 0, &values)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Checker<E = NativeEq> {
    config: Config,
    equality: E,
}

impl Checker {
    /// Creates a checker comparing results with [`PartialEq`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            equality: NativeEq,
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E> fmt::Debug for Checker<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("config", &self.config)
            .field("equality", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E> Checker<E> {
    /// Replaces the equality strategy, keeping the configuration.
    #[must_use]
    pub fn with_equality<E2>(self, equality: E2) -> Checker<E2> {
        Checker {
            config: self.config,
            equality,
        }
    }

    /// Configuration applied to every check.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn equality(&self) -> &E {
        &self.equality
    }

    /// Drives `trial` once per configured test case against a random source
    /// seeded with `seed`.
    pub(crate) fn run_trials<F>(&self, law: Law, seed: u64, trial: F) -> Result<LawReport, LawError>
    where
        F: FnMut(&mut LawRng) -> Result<(), TrialFailure>,
    {
        self.run_cases(law, seed, self.config.test_cases().get(), trial)
    }

    /// Drives `trial` exactly `trials` times.
    ///
    /// The deadline is only consulted between trials, so the first trial
    /// always runs and a hung operation is never interrupted.
    pub(crate) fn run_cases<F>(
        &self,
        law: Law,
        seed: u64,
        trials: usize,
        mut trial: F,
    ) -> Result<LawReport, LawError>
    where
        F: FnMut(&mut LawRng) -> Result<(), TrialFailure>,
    {
        let span = info_span!("lawtest.check", law = law.name(), trials, seed);
        let _entered = span.enter();

        let started = Instant::now();
        let deadline = started.checked_add(self.config.timeout());
        let mut rng = rng_from_seed(seed);
        for index in 0..trials {
            if index > 0 && deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(completed = index, timeout = ?self.config.timeout(), "check timed out");
                telemetry::record_check(law, index, started.elapsed());
                return Err(LawError::TimedOut {
                    law,
                    completed: index,
                    requested: trials,
                    timeout: self.config.timeout(),
                });
            }
            if let Err(failure) = trial(&mut rng) {
                let violation = Violation::new(
                    law,
                    failure.statement,
                    index,
                    seed,
                    failure.counterexample,
                );
                warn!(
                    trial = index,
                    statement = violation.statement(),
                    counterexample = %violation.counterexample(),
                    "law violated",
                );
                telemetry::record_check(law, index + 1, started.elapsed());
                telemetry::record_violations(law, 1);
                return Err(LawError::violated(violation));
            }
        }

        info!(elapsed = ?started.elapsed(), "law holds");
        telemetry::record_check(law, trials, started.elapsed());
        Ok(LawReport::new(law, trials, seed))
    }
}

/// The failed equation of a single trial and the values that broke it.
#[derive(Debug)]
pub(crate) struct TrialFailure {
    statement: &'static str,
    counterexample: Counterexample,
}

/// Passes the trial when `holds`, otherwise captures the counterexample.
///
/// The counterexample is built lazily so passing trials never pay for
/// rendering their operands.
pub(crate) fn ensure<F>(
    holds: bool,
    statement: &'static str,
    counterexample: F,
) -> Result<(), TrialFailure>
where
    F: FnOnce() -> Counterexample,
{
    if holds {
        Ok(())
    } else {
        Err(TrialFailure {
            statement,
            counterexample: counterexample(),
        })
    }
}
