//! Built-in generators and combinators.

use std::{fmt, ops::RangeInclusive};

use rand::{
    Rng,
    distributions::{Alphanumeric as AlphanumericChars, uniform::SampleUniform},
};

use super::{Generator, LawRng};
use crate::error::GeneratorError;

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer types accepted by [`int_range`].
pub trait IntBound: sealed::Sealed + SampleUniform + PartialOrd + Copy + fmt::Debug {}

/// Primitive floating-point types accepted by [`float_range`].
pub trait FloatBound: sealed::Sealed + SampleUniform + PartialOrd + Copy + fmt::Debug {
    /// Returns `true` when the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Returns `true` when `max - min` does not overflow.
    fn span_is_finite(min: Self, max: Self) -> bool;
}

macro_rules! int_bounds {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl IntBound for $ty {}
        )+
    };
}

int_bounds!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_bounds {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl FloatBound for $ty {
                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                fn span_is_finite(min: Self, max: Self) -> bool {
                    (max - min).is_finite()
                }
            }
        )+
    };
}

float_bounds!(f32, f64);

fn inverted<T: fmt::Debug>(min: &T, max: &T) -> GeneratorError {
    GeneratorError::InvertedRange {
        min: format!("{min:?}"),
        max: format!("{max:?}"),
    }
}

/// Uniform integers in `[min, max]`, built by [`int_range`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntRange<T> {
    min: T,
    max: T,
}

/// Creates a generator of uniformly distributed integers in `[min, max]`.
///
/// # Errors
/// Returns [`GeneratorError::InvertedRange`] when `min > max`; no generator
/// is produced in that case.
///
/// # Examples
/// ```
/// use lawtest_core::{GeneratorError, int_range};
///
/// let range = int_range(-100_i64, 100)?;
/// assert_eq!((range.min(), range.max()), (-100, 100));
///
/// let err = int_range(10_u32, 1).expect_err("inverted bounds are rejected");
/// assert!(matches!(err, GeneratorError::InvertedRange { .. }));
/// # Ok::<(), GeneratorError>(())
/// ```
pub fn int_range<T: IntBound>(min: T, max: T) -> Result<IntRange<T>, GeneratorError> {
    if min > max {
        return Err(inverted(&min, &max));
    }
    Ok(IntRange { min, max })
}

impl<T: IntBound> IntRange<T> {
    /// Inclusive lower bound.
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: IntBound> Generator<T> for IntRange<T> {
    fn generate(&self, rng: &mut LawRng) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

/// Uniform floats in `[min, max]`, built by [`float_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange<T> {
    min: T,
    max: T,
}

/// Creates a generator of uniformly distributed floats in `[min, max]`.
///
/// # Errors
/// Returns [`GeneratorError::NonFiniteBound`] when a bound (or the span
/// between them) is NaN or infinite, and [`GeneratorError::InvertedRange`]
/// when `min > max`.
pub fn float_range<T: FloatBound>(min: T, max: T) -> Result<FloatRange<T>, GeneratorError> {
    if let Some(bound) = [min, max].into_iter().find(|bound| !bound.is_finite()) {
        return Err(GeneratorError::NonFiniteBound {
            bound: format!("{bound:?}"),
        });
    }
    if min > max {
        return Err(inverted(&min, &max));
    }
    if !T::span_is_finite(min, max) {
        return Err(GeneratorError::NonFiniteBound {
            bound: format!("{max:?} - {min:?}"),
        });
    }
    Ok(FloatRange { min, max })
}

impl<T: FloatBound> FloatRange<T> {
    /// Inclusive lower bound.
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: FloatBound> Generator<T> for FloatRange<T> {
    fn generate(&self, rng: &mut LawRng) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

/// Fixed-length strings over `[a-zA-Z0-9]`, built by [`alphanumeric`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Alphanumeric {
    len: usize,
}

/// Creates a generator of alphanumeric strings of exactly `len` characters.
#[must_use]
pub fn alphanumeric(len: usize) -> Alphanumeric {
    Alphanumeric { len }
}

impl Generator<String> for Alphanumeric {
    fn generate(&self, rng: &mut LawRng) -> String {
        (0..self.len)
            .map(|_| char::from(rng.sample(AlphanumericChars)))
            .collect()
    }
}

/// Fair coin flips, built by [`boolean`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Boolean;

/// Creates a generator of uniformly distributed booleans.
#[must_use]
pub fn boolean() -> Boolean {
    Boolean
}

impl Generator<bool> for Boolean {
    fn generate(&self, rng: &mut LawRng) -> bool {
        rng.gen_bool(0.5)
    }
}

/// Vectors of generated elements, built by [`vec_of`].
#[derive(Clone, Debug)]
pub struct VecOf<G> {
    element: G,
    len: RangeInclusive<usize>,
}

/// Creates a generator of vectors whose length is drawn from `len`.
///
/// # Errors
/// Returns [`GeneratorError::InvertedRange`] when the length range is empty.
///
/// # Examples
/// ```
/// use lawtest_core::{Generator, LawRng, int_range, vec_of};
/// use rand::SeedableRng;
///
/// let lists = vec_of(int_range(0_u8, 9)?, 1..=4)?;
/// let list = lists.generate(&mut LawRng::seed_from_u64(11));
/// assert!((1..=4).contains(&list.len()));
/// # Ok::<(), lawtest_core::GeneratorError>(())
/// ```
pub fn vec_of<G>(element: G, len: RangeInclusive<usize>) -> Result<VecOf<G>, GeneratorError> {
    if len.start() > len.end() {
        return Err(inverted(len.start(), len.end()));
    }
    Ok(VecOf { element, len })
}

impl<T, G> Generator<Vec<T>> for VecOf<G>
where
    G: Generator<T>,
{
    fn generate(&self, rng: &mut LawRng) -> Vec<T> {
        let len = rng.gen_range(self.len.clone());
        (0..len).map(|_| self.element.generate(rng)).collect()
    }
}

/// Uniform choice among fixed values, built by [`one_of`].
#[derive(Clone, Debug)]
pub struct OneOf<T> {
    values: Vec<T>,
}

/// Creates a generator choosing uniformly among `values`.
///
/// # Errors
/// Returns [`GeneratorError::EmptyChoice`] when `values` is empty.
pub fn one_of<T: Clone>(values: impl Into<Vec<T>>) -> Result<OneOf<T>, GeneratorError> {
    let values = values.into();
    if values.is_empty() {
        return Err(GeneratorError::EmptyChoice);
    }
    Ok(OneOf { values })
}

impl<T: Clone> Generator<T> for OneOf<T> {
    fn generate(&self, rng: &mut LawRng) -> T {
        let index = rng.gen_range(0..self.values.len());
        self.values[index].clone()
    }
}

/// Always yields the same value, built by [`constant`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Constant<T> {
    value: T,
}

/// Creates a generator that always yields a clone of `value`.
#[must_use]
pub fn constant<T: Clone>(value: T) -> Constant<T> {
    Constant { value }
}

impl<T: Clone> Generator<T> for Constant<T> {
    fn generate(&self, _rng: &mut LawRng) -> T {
        self.value.clone()
    }
}
