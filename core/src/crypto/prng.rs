//! crypto/prng.rs
//! Seeded generator behind the key schedule.
//!
//! Each call hashes the running value through one linear-congruential step
//! and then increments the running value, so the sequence is a pure function
//! of the starting value and the number of calls. Integer-only: outputs are
//! identical on every platform.

use crate::constants::lcg;

/// 2^53, the number of distinct outputs of `next_f64`.
const UNIT_SCALE: f64 = (1u64 << 53) as f64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    value: u64,
}

impl SeededRandom {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Current running value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Shift the running value without sampling.
    pub fn advance(&mut self, by: u64) {
        self.value = self.value.wrapping_add(by);
    }

    /// Next sample in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let state = self
            .value
            .wrapping_mul(lcg::MULTIPLIER)
            .wrapping_add(lcg::INCREMENT);
        self.value = self.value.wrapping_add(1);
        (state >> 11) as f64 / UNIT_SCALE
    }

    /// `floor(next_f64() * bound)`, clamped to `bound - 1`.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let scaled = (self.next_f64() * bound as f64).floor() as usize;
        scaled.min(bound - 1)
    }
}

/// Sum of UTF-16 code units of `seed`.
pub fn code_sum(seed: &str) -> u64 {
    seed.encode_utf16().map(u64::from).sum()
}

/// Sum of UTF-16 code units of `seed`, each weighted by its 1-based position.
pub fn weighted_code_sum(seed: &str) -> u64 {
    seed.encode_utf16()
        .enumerate()
        .map(|(i, unit)| u64::from(unit) * (i as u64 + 1))
        .sum()
}
