//! Fixtures shared by the integration suites.
#![allow(dead_code, reason = "each suite uses a different subset of the fixtures")]

use std::{cell::RefCell, collections::BTreeMap};

use lawtest_core::{
    Config, ConfigBuilder, Generator, Group, Homomorphism, IdempotentOp, IntRange, LawRng, Monoid,
    Semigroup, alphanumeric, int_range, vec_of,
};

/// Deterministic configuration for suites that assert on counterexamples.
pub fn seeded(seed: u64) -> Config {
    ConfigBuilder::new()
        .with_seed(seed)
        .build()
        .expect("seeded configuration is valid")
}

/// Integers in `[-100, 100]`.
pub fn small_ints() -> IntRange<i64> {
    int_range(-100, 100).expect("range is valid")
}

/// ℤ/nℤ under addition.
pub struct AdditiveMod {
    modulus: i64,
    residues: IntRange<i64>,
}

impl AdditiveMod {
    pub fn new(modulus: i64) -> Self {
        Self {
            modulus,
            residues: int_range(0, modulus - 1).expect("modulus is positive"),
        }
    }
}

impl Semigroup for AdditiveMod {
    type Element = i64;

    fn op(&self, a: &i64, b: &i64) -> i64 {
        (a + b).rem_euclid(self.modulus)
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        self.residues.generate(rng)
    }

    fn contains(&self, x: &i64) -> bool {
        (0..self.modulus).contains(x)
    }
}

impl Monoid for AdditiveMod {
    fn identity(&self) -> i64 {
        0
    }
}

impl Group for AdditiveMod {
    fn inverse(&self, a: &i64) -> i64 {
        (-a).rem_euclid(self.modulus)
    }
}

/// ℤ/nℤ whose declared inverse is the element itself.
pub struct SelfInverseMod(pub AdditiveMod);

impl Semigroup for SelfInverseMod {
    type Element = i64;

    fn op(&self, a: &i64, b: &i64) -> i64 {
        self.0.op(a, b)
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        self.0.generate(rng)
    }
}

impl Monoid for SelfInverseMod {
    fn identity(&self) -> i64 {
        0
    }
}

impl Group for SelfInverseMod {
    fn inverse(&self, a: &i64) -> i64 {
        *a
    }
}

/// Integers under subtraction, declared as a group.
pub struct Subtraction;

impl Semigroup for Subtraction {
    type Element = i64;

    fn op(&self, a: &i64, b: &i64) -> i64 {
        a - b
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        small_ints().generate(rng)
    }
}

impl Monoid for Subtraction {
    fn identity(&self) -> i64 {
        0
    }
}

impl Group for Subtraction {
    fn inverse(&self, a: &i64) -> i64 {
        *a
    }
}

/// (ℤ, +) restricted to inputs in `[-1000, 1000]`, with a configurable
/// declared identity.
pub struct IntegerAddition {
    identity: i64,
}

impl IntegerAddition {
    pub const fn new() -> Self {
        Self { identity: 0 }
    }

    pub const fn with_wrong_identity(identity: i64) -> Self {
        Self { identity }
    }
}

impl Semigroup for IntegerAddition {
    type Element = i64;

    fn op(&self, a: &i64, b: &i64) -> i64 {
        a + b
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        rng_int(rng, -1_000, 1_000)
    }
}

impl Monoid for IntegerAddition {
    fn identity(&self) -> i64 {
        self.identity
    }
}

impl Group for IntegerAddition {
    fn inverse(&self, a: &i64) -> i64 {
        -a
    }
}

fn rng_int(rng: &mut LawRng, min: i64, max: i64) -> i64 {
    int_range(min, max).expect("range is valid").generate(rng)
}

/// `x ↦ 2x + offset` from (ℤ, +) into `target`.
pub struct Affine {
    source: IntegerAddition,
    target: IntegerAddition,
    offset: i64,
}

impl Affine {
    /// `x ↦ 2x`, a homomorphism.
    pub const fn doubling() -> Self {
        Self {
            source: IntegerAddition::new(),
            target: IntegerAddition::new(),
            offset: 0,
        }
    }

    /// `x ↦ 2x + 1`, which breaks operation preservation.
    pub const fn shifted() -> Self {
        Self {
            offset: 1,
            ..Self::doubling()
        }
    }

    /// `x ↦ 2x` into a target that misdeclares its identity.
    pub const fn into_misdeclared_target() -> Self {
        Self {
            target: IntegerAddition::with_wrong_identity(1),
            ..Self::doubling()
        }
    }

    /// `x ↦ 2x + 1` into a target claiming 5 as its identity, breaking both
    /// preservation laws.
    pub const fn shifted_into_misdeclared_target() -> Self {
        Self {
            target: IntegerAddition::with_wrong_identity(5),
            ..Self::shifted()
        }
    }
}

impl Homomorphism for Affine {
    type Source = IntegerAddition;
    type Target = IntegerAddition;

    fn source(&self) -> &IntegerAddition {
        &self.source
    }

    fn target(&self) -> &IntegerAddition {
        &self.target
    }

    fn map(&self, x: &i64) -> i64 {
        2 * x + self.offset
    }
}

/// Strings under concatenation.
pub struct Concat;

impl Semigroup for Concat {
    type Element = String;

    fn op(&self, a: &String, b: &String) -> String {
        format!("{a}{b}")
    }

    fn generate(&self, rng: &mut LawRng) -> String {
        alphanumeric(5).generate(rng)
    }
}

impl Monoid for Concat {
    fn identity(&self) -> String {
        String::new()
    }
}

/// `i32` under `max`.
pub struct Max;

impl Semigroup for Max {
    type Element = i32;

    fn op(&self, a: &i32, b: &i32) -> i32 {
        *a.max(b)
    }

    fn generate(&self, rng: &mut LawRng) -> i32 {
        int_range(i32::MIN, i32::MAX).expect("range is valid").generate(rng)
    }
}

/// Absolute value, an idempotent operation.
pub struct Abs;

impl IdempotentOp for Abs {
    type Element = i64;

    fn apply(&self, x: &i64) -> i64 {
        x.abs()
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        small_ints().generate(rng)
    }
}

/// Text normalisation: trim then lowercase.
pub struct Normalise;

impl IdempotentOp for Normalise {
    type Element = String;

    fn apply(&self, x: &String) -> String {
        x.trim().to_lowercase()
    }

    fn generate(&self, rng: &mut LawRng) -> String {
        format!("  {} ", alphanumeric(8).generate(rng))
    }
}

/// Negation, which is not idempotent.
pub struct Negate;

impl IdempotentOp for Negate {
    type Element = i64;

    fn apply(&self, x: &i64) -> i64 {
        -x
    }

    fn generate(&self, rng: &mut LawRng) -> i64 {
        rng_int(rng, 1, 100)
    }
}

/// A cache whose entries sit behind interior mutability, so a merge taking
/// `&Cache` can still mutate its operands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cache {
    entries: RefCell<BTreeMap<String, i64>>,
}

impl Cache {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

/// Caches holding one to four random entries.
pub fn caches() -> impl Generator<Cache> {
    vec_of(alphanumeric(6), 1..=4)
        .expect("length range is valid")
        .map(|keys: Vec<String>| Cache {
            entries: RefCell::new(keys.into_iter().zip(0..).collect()),
        })
}

/// Merges `b` into `a` in place and returns a copy of the result.
pub fn mutating_merge(a: &Cache, b: &Cache) -> Cache {
    a.entries
        .borrow_mut()
        .extend(b.entries.borrow().iter().map(|(k, v)| (k.clone(), *v)));
    a.clone()
}

/// Builds a fresh cache holding the entries of both operands.
pub fn allocating_merge(a: &Cache, b: &Cache) -> Cache {
    let mut merged = a.entries.borrow().clone();
    merged.extend(b.entries.borrow().iter().map(|(k, v)| (k.clone(), *v)));
    Cache {
        entries: RefCell::new(merged),
    }
}

/// A [`Cache`] that cannot be compared with `PartialEq`.
#[derive(Clone, Debug)]
pub struct Ledger(Cache);

pub fn ledgers() -> impl Generator<Ledger> {
    caches().map(Ledger)
}

/// Ledgers are equal when they hold the same keys, whatever the values.
pub fn same_keys(a: &Ledger, b: &Ledger) -> bool {
    a.0.keys() == b.0.keys()
}

pub fn mutating_ledger_merge(a: &Ledger, b: &Ledger) -> Ledger {
    Ledger(mutating_merge(&a.0, &b.0))
}

pub fn allocating_ledger_merge(a: &Ledger, b: &Ledger) -> Ledger {
    Ledger(allocating_merge(&a.0, &b.0))
}

/// A multiset of small integers stored in arrival order. It has no
/// `PartialEq`; [`same_multiset`] compares bags regardless of order.
#[derive(Clone, Debug)]
pub struct Bag(pub Vec<i64>);

impl Bag {
    fn sorted(&self) -> Vec<i64> {
        let mut items = self.0.clone();
        items.sort_unstable();
        items
    }
}

pub fn same_multiset(a: &Bag, b: &Bag) -> bool {
    a.sorted() == b.sorted()
}

/// Bags of zero to five digits.
pub fn bags() -> impl Generator<Bag> + Sync {
    vec_of(int_range(0_i64, 9).expect("range is valid"), 0..=5)
        .expect("length range is valid")
        .map(Bag)
}

/// `a` followed by `b` reversed: associative as a multiset but not as a
/// sequence.
pub fn append_reversed(a: &Bag, b: &Bag) -> Bag {
    Bag(a.0.iter().chain(b.0.iter().rev()).copied().collect())
}

/// Decimal digits of `n`, most significant first.
pub fn digits(n: &u64) -> Bag {
    Bag(n
        .to_string()
        .bytes()
        .map(|digit| i64::from(digit - b'0'))
        .collect())
}

/// Decimal digits of `n`, least significant first.
pub fn digits_reversed(n: &u64) -> Bag {
    let mut bag = digits(n);
    bag.0.reverse();
    bag
}

/// Digits of `n + 1`; their sum differs from the digit sum of `n`.
pub fn successor_digits(n: &u64) -> Bag {
    digits(&(n + 1))
}

pub fn factorial_recursive(n: &u64) -> u64 {
    if *n == 0 { 1 } else { n * factorial_recursive(&(n - 1)) }
}

pub fn factorial_accumulator(n: &u64) -> u64 {
    let mut acc = 1;
    let mut k = *n;
    while k > 1 {
        acc *= k;
        k -= 1;
    }
    acc
}

/// Treats 2 as a base case, so every input above 2 comes out halved.
pub fn factorial_off_by_one(n: &u64) -> u64 {
    if *n <= 2 { 1 } else { n * factorial_off_by_one(&(n - 1)) }
}
