//! `a∘a⁻¹ = e` and `a⁻¹∘a = e`

use std::fmt;

use super::{Checker, ensure};
use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

const RIGHT_INVERSE: &str = "a∘a⁻¹ = e";
const LEFT_INVERSE: &str = "a⁻¹∘a = e";

impl<E> Checker<E> {
    /// Checks that `inverse` yields two-sided inverses for `op` with respect
    /// to `identity`.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `a`, `inverse`, `result` and `e`
    /// for the first failing side, or [`LawError::TimedOut`].
    pub fn inverse<T, Op, Inv, G>(
        &self,
        op: Op,
        inverse: Inv,
        identity: T,
        generator: &G,
    ) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        Inv: Fn(&T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        let e = identity;
        self.run_trials(Law::Inverse, self.config().resolve_seed(), |rng| {
            let a = generator.generate(rng);
            let a_inv = inverse(&a);
            for (statement, result) in [
                (RIGHT_INVERSE, op(&a, &a_inv)),
                (LEFT_INVERSE, op(&a_inv, &a)),
            ] {
                ensure(self.equality().equal(&result, &e), statement, || {
                    Counterexample::new()
                        .with("a", &a)
                        .with("inverse", &a_inv)
                        .with("result", &result)
                        .with("e", &e)
                })?;
            }
            Ok(())
        })
    }
}

/// Checks the inverse law with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::inverse`].
pub fn inverse<T, Op, Inv, G>(
    op: Op,
    inverse: Inv,
    identity: T,
    generator: &G,
) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq,
    Op: Fn(&T, &T) -> T,
    Inv: Fn(&T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().inverse(op, inverse, identity, generator)
}
