//! `(a∘b)∘c = a∘(b∘c)`

use std::fmt;

use super::{Checker, ensure};
use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

pub(crate) const STATEMENT: &str = "(a∘b)∘c = a∘(b∘c)";

impl<E> Checker<E> {
    /// Checks that `op` is associative over values drawn from `generator`.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `a`, `b`, `c` and both
    /// association orders (`left`, `right`) for the first failing trial, or
    /// [`LawError::TimedOut`] when the configured timeout elapses.
    pub fn associative<T, Op, G>(&self, op: Op, generator: &G) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        self.associative_seeded(&op, generator, self.config().resolve_seed())
    }

    /// Sequential associativity under an explicit seed, shared with the
    /// concurrent variant so both phases replay from one seed.
    pub(crate) fn associative_seeded<T, Op, G>(
        &self,
        op: &Op,
        generator: &G,
        seed: u64,
    ) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        self.run_trials(Law::Associativity, seed, |rng| {
            let a = generator.generate(rng);
            let b = generator.generate(rng);
            let c = generator.generate(rng);
            let (left, right) = associate(op, &a, &b, &c);
            ensure(self.equality().equal(&left, &right), STATEMENT, || {
                Counterexample::new()
                    .with("a", &a)
                    .with("b", &b)
                    .with("c", &c)
                    .with("left", &left)
                    .with("right", &right)
            })
        })
    }
}

/// Evaluates both association orders of `a∘b∘c`.
pub(crate) fn associate<T, Op>(op: &Op, a: &T, b: &T, c: &T) -> (T, T)
where
    Op: Fn(&T, &T) -> T,
{
    let left = op(&op(a, b), c);
    let right = op(a, &op(b, c));
    (left, right)
}

/// Checks associativity with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::associative`].
pub fn associative<T, Op, G>(op: Op, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq,
    Op: Fn(&T, &T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().associative(op, generator)
}
