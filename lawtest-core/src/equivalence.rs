//! Compares two implementations of the same function.

use std::fmt;

use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    laws::{Checker, ensure},
    report::{Counterexample, LawReport},
};

const STATEMENT: &str = "f₁(x) = f₂(x)";

impl<E> Checker<E> {
    /// Checks that `first` and `second` agree on inputs drawn from
    /// `generator`.
    ///
    /// Outputs are compared through the checker's equality strategy, so the
    /// output type may differ from the input type.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with the input `x` and both outputs
    /// (`first`, `second`) for the first disagreement, or
    /// [`LawError::TimedOut`].
    ///
    /// # Examples
    /// ```
    /// use lawtest_core::{Checker, Config, int_range};
    ///
    /// fn recursive(n: &u64) -> u64 {
    ///     if *n <= 1 { 1 } else { n * recursive(&(n - 1)) }
    /// }
    /// fn iterative(n: &u64) -> u64 {
    ///     (1..=*n).product()
    /// }
    ///
    /// let inputs = int_range(1_u64, 15)?;
    /// Checker::new(Config::default()).equivalent(recursive, iterative, &inputs)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn equivalent<T, R, F1, F2, G>(
        &self,
        first: F1,
        second: F2,
        generator: &G,
    ) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        R: fmt::Debug,
        F1: Fn(&T) -> R,
        F2: Fn(&T) -> R,
        G: Generator<T> + ?Sized,
        E: Equality<R>,
    {
        self.run_trials(Law::Equivalence, self.config().resolve_seed(), |rng| {
            let x = generator.generate(rng);
            let left = first(&x);
            let right = second(&x);
            ensure(self.equality().equal(&left, &right), STATEMENT, || {
                Counterexample::new()
                    .with("x", &x)
                    .with("first", &left)
                    .with("second", &right)
            })
        })
    }
}

/// Checks two implementations for equivalence with the default configuration
/// and `PartialEq`.
///
/// # Errors
/// See [`Checker::equivalent`].
pub fn equivalent<T, R, F1, F2, G>(
    first: F1,
    second: F2,
    generator: &G,
) -> Result<LawReport, LawError>
where
    T: fmt::Debug,
    R: fmt::Debug + PartialEq,
    F1: Fn(&T) -> R,
    F2: Fn(&T) -> R,
    G: Generator<T> + ?Sized,
{
    Checker::default().equivalent(first, second, generator)
}
