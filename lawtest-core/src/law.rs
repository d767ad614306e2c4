//! Identifiers for the laws the checkers verify.

use std::fmt;

/// Enumerates every law a checker can report on.
///
/// Structure verifiers record one entry per sub-check, so the variant also
/// acts as the sub-check name surfaced in reports, spans and errors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Law {
    /// `(a∘b)∘c = a∘(b∘c)`
    Associativity,
    /// `a∘b = b∘a`
    Commutativity,
    /// `a∘e = a` and `e∘a = a`
    Identity,
    /// `a∘a⁻¹ = e` and `a⁻¹∘a = e`
    Inverse,
    /// `a∘b` stays inside the carrier set.
    Closure,
    /// `f(f(x)) = f(x)`
    Idempotence,
    /// `f₁(x) = f₂(x)`
    Equivalence,
    /// `h(a∘b) = h(a)∘h(b)`
    OperationPreservation,
    /// `h(e_source) = e_target`
    IdentityPreservation,
    /// Concurrent application neither faults nor diverges.
    ParallelSafety,
    /// Associativity holds while workers run concurrently.
    ParallelAssociativity,
    /// The operation leaves both operands unchanged.
    Immutability,
}

impl Law {
    /// Returns the stable lower-case name used in logs and reports.
    ///
    /// # Examples
    /// ```
    /// use lawtest_core::Law;
    ///
    /// assert_eq!(Law::Associativity.name(), "associativity");
    /// assert_eq!(Law::IdentityPreservation.to_string(), "identity preservation");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Associativity => "associativity",
            Self::Commutativity => "commutativity",
            Self::Identity => "identity",
            Self::Inverse => "inverse",
            Self::Closure => "closure",
            Self::Idempotence => "idempotence",
            Self::Equivalence => "equivalence",
            Self::OperationPreservation => "operation preservation",
            Self::IdentityPreservation => "identity preservation",
            Self::ParallelSafety => "parallel safety",
            Self::ParallelAssociativity => "parallel associativity",
            Self::Immutability => "immutability",
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
