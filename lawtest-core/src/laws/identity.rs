//! `a∘e = a` and `e∘a = a`

use std::fmt;

use super::{Checker, ensure};
use crate::{
    equality::Equality,
    error::LawError,
    generator::Generator,
    law::Law,
    report::{Counterexample, LawReport},
};

const RIGHT_IDENTITY: &str = "a∘e = a";
const LEFT_IDENTITY: &str = "e∘a = a";

impl<E> Checker<E> {
    /// Checks that `identity` is a two-sided identity element for `op`.
    ///
    /// The right side (`a∘e`) is checked before the left side (`e∘a`); the
    /// violation's statement names the side that failed.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] with `a`, `e` and `result`, or
    /// [`LawError::TimedOut`].
    pub fn identity<T, Op, G>(
        &self,
        op: Op,
        identity: T,
        generator: &G,
    ) -> Result<LawReport, LawError>
    where
        T: fmt::Debug,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        let e = identity;
        self.run_trials(Law::Identity, self.config().resolve_seed(), |rng| {
            let a = generator.generate(rng);
            for (statement, result) in [(RIGHT_IDENTITY, op(&a, &e)), (LEFT_IDENTITY, op(&e, &a))]
            {
                ensure(self.equality().equal(&result, &a), statement, || {
                    Counterexample::new()
                        .with("a", &a)
                        .with("e", &e)
                        .with("result", &result)
                })?;
            }
            Ok(())
        })
    }
}

/// Checks the identity law with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::identity`].
pub fn identity<T, Op, G>(op: Op, identity: T, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq,
    Op: Fn(&T, &T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().identity(op, identity, generator)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::generator::int_range;

    #[rstest]
    #[case::addition(|a: &i64, b: &i64| a + b, 0)]
    #[case::multiplication(|a: &i64, b: &i64| a * b, 1)]
    #[case::maximum(|a: &i64, b: &i64| *a.max(b), i64::MIN)]
    fn identity_elements_hold(#[case] op: fn(&i64, &i64) -> i64, #[case] e: i64) {
        let values = int_range(-100_i64, 100).expect("range is valid");
        identity(op, e, &values).expect("identity holds");
    }

    #[test]
    fn wrong_identity_names_the_failing_side() {
        let values = int_range(-100_i64, 100).expect("range is valid");
        let err = identity(|a: &i64, b: &i64| a + b, 1, &values)
            .expect_err("1 is not an additive identity");
        let violation = err.violation().expect("violation recorded");
        assert_eq!(violation.statement(), RIGHT_IDENTITY);
        assert_eq!(violation.counterexample().get("e"), Some("1"));
    }

    #[test]
    fn one_sided_identity_reports_the_left_side() {
        // `a - 0 = a` holds but `0 - a = a` does not for a ≠ 0.
        let values = int_range(1_i64, 100).expect("range is valid");
        let err = identity(|a: &i64, b: &i64| a - b, 0, &values)
            .expect_err("zero is only a right identity for subtraction");
        let violation = err.violation().expect("violation recorded");
        assert_eq!(violation.statement(), LEFT_IDENTITY);
    }
}
