//! `a∘b = b∘a`

use std::fmt;

use super::{Checker, ensure};
use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

const STATEMENT: &str = "a∘b = b∘a";

impl<E> Checker<E> {
    /// Checks that `op` is commutative over values drawn from `generator`.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `a`, `b`, `left` (`a∘b`) and
    /// `right` (`b∘a`), or [`LawError::TimedOut`].
    pub fn commutative<T, Op, G>(&self, op: Op, generator: &G) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        self.run_trials(Law::Commutativity, self.config().resolve_seed(), |rng| {
            let a = generator.generate(rng);
            let b = generator.generate(rng);
            let left = op(&a, &b);
            let right = op(&b, &a);
            ensure(self.equality().equal(&left, &right), STATEMENT, || {
                Counterexample::new()
                    .with("a", &a)
                    .with("b", &b)
                    .with("left", &left)
                    .with("right", &right)
            })
        })
    }
}

/// Checks commutativity with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::commutative`].
pub fn commutative<T, Op, G>(op: Op, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq,
    Op: Fn(&T, &T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().commutative(op, generator)
}
