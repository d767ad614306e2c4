//! Structure verifiers: run every law a structure declares and collect the
//! outcome of each.

use std::fmt;

use tracing::{info, info_span, warn};

use super::{ElementOf, Group, Homomorphism, IdempotentOp, Monoid, Semigroup};
use crate::{
    equality::Equality,
    error::LawError,
    generator::LawRng,
    law::Law,
    laws::{Checker, ensure},
    report::{Counterexample, LawReport, StructureReport},
};

const OPERATION_PRESERVATION: &str = "h(a∘b) = h(a)∘h(b)";
const IDENTITY_PRESERVATION: &str = "h(e) = e'";

impl<E> Checker<E> {
    /// Verifies associativity and closure.
    ///
    /// # Errors
    /// Returns [`LawError::Rejected`] listing every failing sub-check; its
    /// [`LawError::law`] names the first rejected law.
    pub fn verify_semigroup<S>(&self, semigroup: &S) -> Result<StructureReport, LawError>
    where
        S: Semigroup + ?Sized,
        ElementOf<S>: fmt::Debug,
        E: Equality<ElementOf<S>>,
    {
        self.verify_structure("semigroup", |outcomes| {
            let op = |a: &ElementOf<S>, b: &ElementOf<S>| semigroup.op(a, b);
            let generator = |rng: &mut LawRng| semigroup.generate(rng);
            outcomes.record(self.associative(op, &generator));
            outcomes.record(self.carrier_closure(semigroup));
        })
    }

    /// Verifies associativity, identity and closure.
    ///
    /// # Errors
    /// Returns [`LawError::Rejected`] listing every failing sub-check.
    pub fn verify_monoid<M>(&self, monoid: &M) -> Result<StructureReport, LawError>
    where
        M: Monoid + ?Sized,
        ElementOf<M>: fmt::Debug,
        E: Equality<ElementOf<M>>,
    {
        self.verify_structure("monoid", |outcomes| {
            let op = |a: &ElementOf<M>, b: &ElementOf<M>| monoid.op(a, b);
            let generator = |rng: &mut LawRng| monoid.generate(rng);
            outcomes.record(self.associative(op, &generator));
            outcomes.record(self.identity(op, monoid.identity(), &generator));
            outcomes.record(self.carrier_closure(monoid));
        })
    }

    /// Verifies associativity, identity, inverse and closure.
    ///
    /// # Errors
    /// Returns [`LawError::Rejected`] listing every failing sub-check.
    ///
    /// # Examples
    /// ```
    /// use lawtest_core::{
    ///     Generator, Group, Law, LawRng, Monoid, Semigroup, int_range, verify_group,
    /// };
    ///
    /// struct AddMod(i64);
    ///
    /// impl Semigroup for AddMod {
    ///     type Element = i64;
    ///     fn op(&self, a: &i64, b: &i64) -> i64 {
    ///         (a + b).rem_euclid(self.0)
    ///     }
    ///     fn generate(&self, rng: &mut LawRng) -> i64 {
    ///         int_range(0, self.0 - 1).expect("modulus is positive").generate(rng)
    ///     }
    ///     fn contains(&self, x: &i64) -> bool {
    ///         (0..self.0).contains(x)
    ///     }
    /// }
    /// impl Monoid for AddMod {
    ///     fn identity(&self) -> i64 {
    ///         0
    ///     }
    /// }
    /// impl Group for AddMod {
    ///     fn inverse(&self, a: &i64) -> i64 {
    ///         (-a).rem_euclid(self.0)
    ///     }
    /// }
    ///
    /// let report = verify_group(&AddMod(12))?;
    /// assert_eq!(
    ///     report.laws(),
    ///     [Law::Associativity, Law::Identity, Law::Inverse, Law::Closure]
    /// );
    /// # Ok::<(), lawtest_core::LawError>(())
    /// ```
    pub fn verify_group<G>(&self, group: &G) -> Result<StructureReport, LawError>
    where
        G: Group + ?Sized,
        ElementOf<G>: fmt::Debug,
        E: Equality<ElementOf<G>>,
    {
        self.verify_structure("group", |outcomes| {
            let op = |a: &ElementOf<G>, b: &ElementOf<G>| group.op(a, b);
            let inverse = |a: &ElementOf<G>| group.inverse(a);
            let generator = |rng: &mut LawRng| group.generate(rng);
            outcomes.record(self.associative(op, &generator));
            outcomes.record(self.identity(op, group.identity(), &generator));
            outcomes.record(self.inverse(op, inverse, group.identity(), &generator));
            outcomes.record(self.carrier_closure(group));
        })
    }

    /// Verifies that the map preserves the operation and the identity.
    ///
    /// Operation preservation runs over random source pairs; identity
    /// preservation is a single deterministic comparison and reports one
    /// trial.
    ///
    /// # Errors
    /// Returns [`LawError::Rejected`] listing every failing sub-check.
    pub fn verify_homomorphism<H>(&self, homomorphism: &H) -> Result<StructureReport, LawError>
    where
        H: Homomorphism + ?Sized,
        ElementOf<H::Source>: fmt::Debug,
        ElementOf<H::Target>: fmt::Debug,
        E: Equality<ElementOf<H::Target>>,
    {
        self.verify_structure("homomorphism", |outcomes| {
            let source = homomorphism.source();
            let target = homomorphism.target();
            let seed = self.config().resolve_seed();

            outcomes.record(self.run_trials(Law::OperationPreservation, seed, |rng| {
                let a = source.generate(rng);
                let b = source.generate(rng);
                let left = homomorphism.map(&source.op(&a, &b));
                let right = target.op(&homomorphism.map(&a), &homomorphism.map(&b));
                ensure(
                    self.equality().equal(&left, &right),
                    OPERATION_PRESERVATION,
                    || {
                        Counterexample::new()
                            .with("a", &a)
                            .with("b", &b)
                            .with("left", &left)
                            .with("right", &right)
                    },
                )
            }));

            outcomes.record(self.run_cases(Law::IdentityPreservation, seed, 1, |_rng| {
                let source_identity = source.identity();
                let mapped = homomorphism.map(&source_identity);
                let target_identity = target.identity();
                ensure(
                    self.equality().equal(&mapped, &target_identity),
                    IDENTITY_PRESERVATION,
                    || {
                        Counterexample::new()
                            .with("e", &source_identity)
                            .with("mapped", &mapped)
                            .with("target_e", &target_identity)
                    },
                )
            }));
        })
    }

    /// Verifies that the operation is idempotent.
    ///
    /// # Errors
    /// Returns [`LawError::Rejected`] wrapping the idempotence failure.
    pub fn verify_idempotent_op<O>(&self, op: &O) -> Result<StructureReport, LawError>
    where
        O: IdempotentOp + ?Sized,
        O::Element: fmt::Debug,
        E: Equality<O::Element>,
    {
        self.verify_structure("idempotent operation", |outcomes| {
            let apply = |x: &O::Element| op.apply(x);
            let generator = |rng: &mut LawRng| op.generate(rng);
            outcomes.record(self.idempotent(apply, &generator));
        })
    }

    fn carrier_closure<S>(&self, semigroup: &S) -> Result<LawReport, LawError>
    where
        S: Semigroup + ?Sized,
        ElementOf<S>: fmt::Debug,
    {
        self.closure_within(
            |a: &ElementOf<S>, b: &ElementOf<S>| semigroup.op(a, b),
            &|rng: &mut LawRng| semigroup.generate(rng),
            |x: &ElementOf<S>| semigroup.contains(x),
        )
    }

    fn verify_structure<F>(
        &self,
        structure: &'static str,
        checks: F,
    ) -> Result<StructureReport, LawError>
    where
        F: FnOnce(&mut Outcomes),
    {
        let span = info_span!("lawtest.structure", structure);
        let _entered = span.enter();

        let mut outcomes = Outcomes {
            report: StructureReport::new(structure),
            failures: Vec::new(),
        };
        checks(&mut outcomes);
        let Outcomes { report, failures } = outcomes;
        if failures.is_empty() {
            info!(checks = report.checks().len(), "structure verified");
            return Ok(report);
        }
        warn!(
            law = failures.first().and_then(LawError::law).map(Law::name),
            failed = failures.len(),
            passed = report.checks().len(),
            "structure rejected",
        );
        Err(LawError::Rejected { report, failures })
    }
}

/// Sub-check outcomes gathered while verifying one structure.
struct Outcomes {
    report: StructureReport,
    failures: Vec<LawError>,
}

impl Outcomes {
    fn record(&mut self, outcome: Result<LawReport, LawError>) {
        match outcome {
            Ok(report) => self.report.push(report),
            Err(error) => self.failures.push(error),
        }
    }
}

/// Verifies a semigroup with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::verify_semigroup`].
pub fn verify_semigroup<S>(semigroup: &S) -> Result<StructureReport, LawError>
where
    S: Semigroup + ?Sized,
    ElementOf<S>: fmt::Debug + PartialEq,
{
    Checker::default().verify_semigroup(semigroup)
}

/// Verifies a monoid with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::verify_monoid`].
pub fn verify_monoid<M>(monoid: &M) -> Result<StructureReport, LawError>
where
    M: Monoid + ?Sized,
    ElementOf<M>: fmt::Debug + PartialEq,
{
    Checker::default().verify_monoid(monoid)
}

/// Verifies a group with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::verify_group`].
pub fn verify_group<G>(group: &G) -> Result<StructureReport, LawError>
where
    G: Group + ?Sized,
    ElementOf<G>: fmt::Debug + PartialEq,
{
    Checker::default().verify_group(group)
}

/// Verifies a homomorphism with the default configuration and `PartialEq`.
///
/// # Errors
/// See [`Checker::verify_homomorphism`].
pub fn verify_homomorphism<H>(homomorphism: &H) -> Result<StructureReport, LawError>
where
    H: Homomorphism + ?Sized,
    ElementOf<H::Source>: fmt::Debug,
    ElementOf<H::Target>: fmt::Debug + PartialEq,
{
    Checker::default().verify_homomorphism(homomorphism)
}

/// Verifies an idempotent operation with the default configuration and
/// `PartialEq`.
///
/// # Errors
/// See [`Checker::verify_idempotent_op`].
pub fn verify_idempotent_op<O>(op: &O) -> Result<StructureReport, LawError>
where
    O: IdempotentOp + ?Sized,
    O::Element: fmt::Debug + PartialEq,
{
    Checker::default().verify_idempotent_op(op)
}
