//! Deterministic RNG wrapper owned by a sweep engine instance.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Deterministic RNG handle used for every random draw of a sweep.
///
/// The handle is a thin wrapper around `StdRng` seeded once from a caller
/// supplied `seed: u64`. It is owned by the engine and passed down by
/// mutable reference; nothing in the workspace keeps a global generator.
/// Reusing the same seed with identical inputs reproduces the same draws.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the seed the handle was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws an integer uniformly from the half open range `[low, high)`.
    ///
    /// Callers must guarantee `low < high`.
    pub fn int_in(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..high)
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
