//! Seeding for the random sources owned by checkers and their workers.

use rand::SeedableRng;

use super::LawRng;

/// SplitMix64 increment (the 64-bit golden ratio), also used to space worker
/// seeds apart.
const WORKER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Builds the random source for a sequential check.
pub(crate) fn rng_from_seed(seed: u64) -> LawRng {
    LawRng::seed_from_u64(seed)
}

/// Builds an independent random source for one concurrency worker.
///
/// Derived from the run seed so a replayed run hands every worker the same
/// stream it saw originally.
pub(crate) fn worker_rng(seed: u64, worker: usize) -> LawRng {
    LawRng::seed_from_u64(mix_worker_seed(seed, worker))
}

#[inline]
fn mix_worker_seed(base_seed: u64, worker_index: usize) -> u64 {
    splitmix64(base_seed ^ ((worker_index as u64 + 1).wrapping_mul(WORKER_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WORKER_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
