//! Seeded random inputs for the step-count sweep.

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, Rng as _, SeedableRng};

/// Deterministic source of integer sequences in `[min, max]`.
#[derive(Debug)]
pub struct DataGen {
    rng: StdRng,
    min: i64,
    max: i64,
}

impl DataGen {
    /// Same `seed`, same bounds, same sequences.
    pub fn new(seed: u64, min: i64, max: i64) -> Result<Self> {
        ensure!(min <= max, "min_value {min} exceeds max_value {max}");
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            min,
            max,
        })
    }

    /// Next sequence of exactly `n` values.
    pub fn sample(&mut self, n: usize) -> Vec<i64> {
        (0..n)
            .map(|_| self.rng.random_range(self.min..=self.max))
            .collect()
    }
}
