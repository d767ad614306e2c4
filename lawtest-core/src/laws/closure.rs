//! `a∘b ∈ S`
//!
//! The element type already guarantees closure over the whole type, so
//! [`Checker::closure`] only exercises the operation. Carrier sets narrower
//! than their type (residues modulo `n`, unit vectors) use
//! [`Checker::closure_within`] with a membership predicate.

use std::fmt;

use super::{Checker, ensure};
use crate::{
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

const STATEMENT: &str = "a∘b ∈ S";

impl<E> Checker<E> {
    /// Applies `op` to random pairs, failing only if the operation panics.
    ///
    /// # Errors
    /// Returns [`LawError::TimedOut`] when the configured timeout elapses.
    pub fn closure<T, Op, G>(&self, op: Op, generator: &G) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
    {
        self.closure_within(op, generator, |_: &T| true)
    }

    /// Checks that `op` maps members of the carrier set back into it.
    ///
    /// Both operands are drawn from `generator`, which is assumed to produce
    /// members only; `contains` then judges the result.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `a`, `b` and `result`, or
    /// [`LawError::TimedOut`].
    pub fn closure_within<T, Op, G, P>(
        &self,
        op: Op,
        generator: &G,
        contains: P,
    ) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        P: Fn(&T) -> bool,
    {
        self.run_trials(Law::Closure, self.config().resolve_seed(), |rng| {
            let a = generator.generate(rng);
            let b = generator.generate(rng);
            let result = op(&a, &b);
            ensure(contains(&result), STATEMENT, || {
                Counterexample::new()
                    .with("a", &a)
                    .with("b", &b)
                    .with("result", &result)
            })
        })
    }
}

/// Exercises `op` for closure with the default configuration.
///
/// # Errors
/// See [`Checker::closure`].
pub fn closure<T, Op, G>(op: Op, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug,
    Op: Fn(&T, &T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().closure(op, generator)
}
