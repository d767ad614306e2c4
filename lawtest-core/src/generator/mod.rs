//! Random value generators.
//!
//! A [`Generator`] holds no random state of its own: the checker owns a
//! [`LawRng`] seeded from its [`crate::Config`] and lends it to the generator
//! on every draw. Pinning the seed therefore reproduces the whole input
//! sequence of a check.

mod builtin;
pub(crate) mod rng;

use std::marker::PhantomData;

pub use self::builtin::{
    Alphanumeric, Boolean, Constant, FloatBound, FloatRange, IntBound, IntRange, OneOf, VecOf,
    alphanumeric, boolean, constant, float_range, int_range, one_of, vec_of,
};

/// Pseudo-random source lent to generators by the checkers.
pub type LawRng = rand::rngs::SmallRng;

/// Produces independent random values of `T`.
///
/// Any `Fn(&mut LawRng) -> T` closure is a generator, so caller-defined
/// generators need no wrapper type.
///
/// # Examples
/// ```
/// use lawtest_core::{Generator, LawRng, int_range};
/// use rand::SeedableRng;
///
/// let digits = int_range(0_u8, 9)?.map(|digit| char::from(b'0' + digit));
/// let mut rng = LawRng::seed_from_u64(3);
/// assert!(digits.generate(&mut rng).is_ascii_digit());
///
/// let pairs = |rng: &mut LawRng| {
///     let x = int_range(1_i32, 5).expect("range is valid").generate(rng);
///     (x, -x)
/// };
/// let (x, y) = pairs.generate(&mut rng);
/// assert_eq!(x, -y);
/// # Ok::<(), lawtest_core::GeneratorError>(())
/// ```
pub trait Generator<T> {
    /// Draws one value.
    fn generate(&self, rng: &mut LawRng) -> T;

    /// Transforms every generated value with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F, T>
    where
        Self: Sized,
        F: Fn(T) -> U,
    {
        Map {
            inner: self,
            f,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Generator<T> for F
where
    F: Fn(&mut LawRng) -> T,
{
    fn generate(&self, rng: &mut LawRng) -> T {
        self(rng)
    }
}

/// Generator returned by [`Generator::map`].
#[derive(Clone, Copy, Debug)]
pub struct Map<G, F, T> {
    inner: G,
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, U, G, F> Generator<U> for Map<G, F, T>
where
    G: Generator<T>,
    F: Fn(T) -> U,
{
    fn generate(&self, rng: &mut LawRng) -> U {
        (self.f)(self.inner.generate(rng))
    }
}

/// Wraps a closure so its argument and return types are inferred.
///
/// Handy when the closure would otherwise need an explicit `&mut LawRng`
/// annotation.
pub fn from_fn<T, F>(f: F) -> F
where
    F: Fn(&mut LawRng) -> T,
{
    f
}
