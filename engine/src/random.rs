//! Injectable randomness
//!
//! Demo data and decision jitter both draw from a [`RandomSource`] passed in by
//! the caller, so tests can pin the exact sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed values in `[0, 1)`
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next(&mut self) -> f64;

    /// Next value in `[low, high)`
    fn next_in(&mut self, low: f64, high: f64) -> f64 {
        low + self.next() * (high - low)
    }
}

/// Production source backed by `rand`'s `StdRng`
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn next(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    /// Create from a non-empty list; an empty list behaves like `ConstantRandom(0.5)`
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_cycles() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next(), 0.1);
        assert_eq!(rng.next(), 0.9);
        assert_eq!(rng.next(), 0.1);
    }

    #[test]
    fn test_next_in_range() {
        let mut rng = ConstantRandom(0.5);
        assert_eq!(rng.next_in(30.0, 70.0), 50.0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);
        for _ in 0..10 {
            let value = a.next();
            assert_eq!(value, b.next());
            assert!((0.0..1.0).contains(&value));
        }
    }
}
