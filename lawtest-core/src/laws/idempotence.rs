//! `f(f(x)) = f(x)`

use std::fmt;

use super::{Checker, ensure};
use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

const STATEMENT: &str = "f(f(x)) = f(x)";

impl<E> Checker<E> {
    /// Checks that applying `op` twice gives the same result as once.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `x`, `once` and `twice`, or
    /// [`LawError::TimedOut`].
    pub fn idempotent<T, Op, G>(&self, op: Op, generator: &G) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        self.run_trials(Law::Idempotence, self.config().resolve_seed(), |rng| {
            let x = generator.generate(rng);
            let once = op(&x);
            let twice = op(&once);
            ensure(self.equality().equal(&twice, &once), STATEMENT, || {
                Counterexample::new()
                    .with("x", &x)
                    .with("once", &once)
                    .with("twice", &twice)
            })
        })
    }
}

/// Checks idempotence with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::idempotent`].
pub fn idempotent<T, Op, G>(op: Op, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq,
    Op: Fn(&T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().idempotent(op, generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{alphanumeric, int_range};

    #[test]
    fn absolute_value_is_idempotent() {
        let values = int_range(-1_000_i64, 1_000).expect("range is valid");
        idempotent(|x: &i64| x.abs(), &values).expect("abs is idempotent");
    }

    #[test]
    fn lowercasing_is_idempotent() {
        idempotent(|s: &String| s.to_lowercase(), &alphanumeric(12))
            .expect("lowercasing is idempotent");
    }

    #[test]
    fn increment_is_not_idempotent() {
        let values = int_range(0_i64, 10).expect("range is valid");
        let err = idempotent(|x: &i64| x + 1, &values).expect_err("x + 2 ≠ x + 1");
        let cx = err.violation().expect("violation recorded").counterexample();
        assert!(cx.get("x").is_some());
        assert_ne!(cx.get("once"), cx.get("twice"));
    }
}
