//! Equality strategies used to compare law outcomes.

/// Decides whether two values count as equal for a law.
///
/// The relation must be reflexive, symmetric and transitive; the checkers
/// rely on that without verifying it.
///
/// Any `Fn(&T, &T) -> bool` closure is an equality strategy, which suits
/// floating-point tolerances or unordered collections.
///
/// # Examples
/// ```
/// use lawtest_core::{Checker, Config, float_range};
///
/// let close = |a: &f64, b: &f64| (a - b).abs() < 1e-9;
/// let checker = Checker::new(Config::default()).with_equality(close);
/// let values = float_range(-1.0, 1.0)?;
/// checker.commutative(|a: &f64, b: &f64| a + b, &values)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Equality<T: ?Sized> {
    /// Returns `true` when `left` and `right` are considered equal.
    fn equal(&self, left: &T, right: &T) -> bool;
}

/// Compares values with their [`PartialEq`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NativeEq;

impl<T: PartialEq + ?Sized> Equality<T> for NativeEq {
    fn equal(&self, left: &T, right: &T) -> bool {
        left == right
    }
}

impl<T, F> Equality<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn equal(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}
