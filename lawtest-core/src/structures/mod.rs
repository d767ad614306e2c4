//! Algebraic structures verified as a bundle of laws.
//!
//! Implement the trait matching the structure's capabilities and hand it to
//! the corresponding verifier. Capabilities nest as supertraits, so a type
//! that only implements [`Semigroup`] cannot be passed to a group verifier.

mod verify;

pub use self::verify::{
    verify_group, verify_homomorphism, verify_idempotent_op, verify_monoid, verify_semigroup,
};
use crate::generator::LawRng;

/// Element type of a structure.
pub type ElementOf<S> = <S as Semigroup>::Element;

/// A set closed under an associative binary operation.
///
/// # Examples
/// ```
/// use lawtest_core::{Generator, LawRng, Semigroup, int_range, verify_semigroup};
///
/// struct Max;
///
/// impl Semigroup for Max {
///     type Element = i32;
///
///     fn op(&self, a: &i32, b: &i32) -> i32 {
///         *a.max(b)
///     }
///
///     fn generate(&self, rng: &mut LawRng) -> i32 {
///         int_range(-50_i32, 50).expect("range is valid").generate(rng)
///     }
/// }
///
/// let report = verify_semigroup(&Max)?;
/// assert_eq!(report.structure(), "semigroup");
/// # Ok::<(), lawtest_core::LawError>(())
/// ```
pub trait Semigroup {
    /// Carrier type.
    type Element;

    /// The binary operation.
    fn op(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Draws a random member of the carrier set.
    fn generate(&self, rng: &mut LawRng) -> Self::Element;

    /// Returns `true` when `x` belongs to the carrier set.
    ///
    /// Defaults to accepting every value of the element type. Override it
    /// when the carrier is a subset, such as residues modulo `n`.
    fn contains(&self, x: &Self::Element) -> bool {
        let _ = x;
        true
    }
}

/// A semigroup with a two-sided identity element.
pub trait Monoid: Semigroup {
    /// The identity element.
    fn identity(&self) -> Self::Element;
}

/// A monoid in which every element has a two-sided inverse.
pub trait Group: Monoid {
    /// Returns the inverse of `a`.
    fn inverse(&self, a: &Self::Element) -> Self::Element;
}

/// A structure-preserving map between two groups.
pub trait Homomorphism {
    /// Domain group.
    type Source: Group;
    /// Codomain group.
    type Target: Group;

    /// The domain.
    fn source(&self) -> &Self::Source;

    /// The codomain.
    fn target(&self) -> &Self::Target;

    /// Maps a source element into the target.
    fn map(&self, x: &ElementOf<Self::Source>) -> ElementOf<Self::Target>;
}

/// A unary operation expected to satisfy `f(f(x)) = f(x)`.
pub trait IdempotentOp {
    /// Input and output type.
    type Element;

    /// Applies the operation.
    fn apply(&self, x: &Self::Element) -> Self::Element;

    /// Draws a random input.
    fn generate(&self, rng: &mut LawRng) -> Self::Element;
}
