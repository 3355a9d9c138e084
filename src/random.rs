//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the run's random source from a 64-bit seed.
///
/// The same seed always yields the same stream, which is what makes a
/// reported run replayable.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh seed from OS entropy.
pub fn random_seed() -> u64 {
    rand::random()
}
