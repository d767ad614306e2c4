//! Property-based verification of algebraic laws.
//!
//! Checks run a caller-supplied operation over randomly generated inputs and
//! stop at the first counterexample, returning it inside a [`LawError`]
//! together with the seed that reproduces it.
//!
//! ```
//! use lawtest_core::{associative, commutative, int_range};
//!
//! let values = int_range(-100_i64, 100)?;
//! associative(|a: &i64, b: &i64| a + b, &values)?;
//! commutative(|a: &i64, b: &i64| a * b, &values)?;
//!
//! let error = associative(|a: &i64, b: &i64| a - b, &values)
//!     .expect_err("subtraction is not associative");
//! println!("{error}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod concurrency;
mod config;
mod equality;
mod equivalence;
mod error;
mod generator;
mod law;
mod laws;
mod report;
mod structures;
mod telemetry;

pub use crate::{
    concurrency::{MAX_REPORTED_VIOLATIONS, immutable_op, parallel_associativity, parallel_safe},
    config::{CASES_ENV_KEY, Config, ConfigBuilder, SEED_ENV_KEY, TIMEOUT_ENV_KEY},
    equality::{Equality, NativeEq},
    equivalence::equivalent,
    error::{
        ConfigError, ConfigErrorCode, GeneratorError, GeneratorErrorCode, LawError, LawErrorCode,
    },
    generator::{
        Alphanumeric, Boolean, Constant, FloatBound, FloatRange, Generator, IntBound, IntRange,
        LawRng, Map, OneOf, VecOf, alphanumeric, boolean, constant, float_range, from_fn,
        int_range, one_of, vec_of,
    },
    law::Law,
    laws::{Checker, associative, closure, commutative, idempotent, identity, inverse},
    report::{
        Counterexample, FaultKind, LawReport, ParallelReport, StructureReport, Violation,
        WorkerFault,
    },
    structures::{
        ElementOf, Group, Homomorphism, IdempotentOp, Monoid, Semigroup, verify_group,
        verify_homomorphism, verify_idempotent_op, verify_monoid, verify_semigroup,
    },
};
