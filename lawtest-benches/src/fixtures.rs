//! Structures and configurations shared by the benchmarks.

use lawtest_core::{
    Config, ConfigBuilder, ConfigError, Generator, GeneratorError, Group, IntRange, LawRng, Monoid,
    Semigroup, int_range,
};

/// Seed used by every benchmark so runs draw identical inputs.
pub const SEED: u64 = 42;

/// Builds a seeded configuration running `cases` trials.
///
/// # Errors
/// Returns [`ConfigError::ZeroTestCases`] when `cases` is zero.
pub fn seeded_config(cases: usize) -> Result<Config, ConfigError> {
    ConfigBuilder::new()
        .with_test_cases(cases)
        .with_seed(SEED)
        .build()
}

/// Addition over the residues `0..modulus`.
#[derive(Clone, Copy, Debug)]
pub struct ModularAddition {
    modulus: i64,
    residues: IntRange<i64>,
}

impl ModularAddition {
    /// Creates the group of residues modulo `modulus`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvertedRange`] when `modulus` is not
    /// positive.
    pub fn new(modulus: i64) -> Result<Self, GeneratorError> {
        let residues = int_range(0, modulus.saturating_sub(1))?;
        Ok(Self { modulus, residues })
    }
}

impl Semigroup for ModularAddition {
    type Element = i64;

    fn op(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_add(*b).rem_euclid(self.modulus)
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        self.residues.generate(rng)
    }

    fn contains(&self, x: &i64) -> bool {
        (0..self.modulus).contains(x)
    }
}

impl Monoid for ModularAddition {
    fn identity(&self) -> i64 {
        0
    }
}

impl Group for ModularAddition {
    fn inverse(&self, a: &i64) -> i64 {
        a.wrapping_neg().rem_euclid(self.modulus)
    }
}
