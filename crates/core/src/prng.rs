//! Seedable Xorshift64 random source for color generation.
//!
//! Every random draw in the trainer (target bin, hue, saturation, lightness)
//! goes through an explicit [`Xorshift64`] handed in by the caller, so a fixed
//! seed replays the exact same sequence of rounds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A zero seed is replaced with a non-zero constant since zero is a fixed
/// point of the algorithm.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a generator seeded from the wall clock.
    ///
    /// This is the default source for interactive play; tests and replays
    /// should use [`Xorshift64::new`] with a fixed seed instead.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max). Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in the inclusive range [lo, hi].
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn next_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "next_inclusive called with lo {lo} > hi {hi}");
        let span = (hi - lo).wrapping_add(1);
        if span == 0 {
            // lo == 0 && hi == u64::MAX: every value is in range.
            return self.next_u64();
        }
        lo + self.next_u64() % span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_matches_golden_value_for_seed_42() {
        // If this breaks, every recorded `--seed` replay changes.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        for _ in 0..10 {
            let v = zero.next_u64();
            assert_ne!(v, 0);
            assert_eq!(v, fallback.next_u64());
        }
    }

    #[test]
    fn same_seed_replays_same_sequence() {
        let mut a = Xorshift64::new(2024);
        let mut b = Xorshift64::new(2024);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn clock_seeded_generator_produces_values() {
        let mut rng = Xorshift64::from_clock();
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn next_range_with_equal_bounds_returns_bound() {
        let mut rng = Xorshift64::new(5);
        for _ in 0..100 {
            assert_eq!(rng.next_range(0.25, 0.25), 0.25);
        }
    }

    #[test]
    fn next_inclusive_hits_both_ends_of_one_to_ten() {
        let mut rng = Xorshift64::new(31337);
        let mut seen = [false; 11];
        for _ in 0..10_000 {
            let v = rng.next_inclusive(1, 10);
            assert!((1..=10).contains(&v), "out of range: {v}");
            seen[v as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s), "not every value drawn: {seen:?}");
    }

    #[test]
    fn next_inclusive_full_range_does_not_overflow() {
        let mut rng = Xorshift64::new(9);
        rng.next_inclusive(0, u64::MAX);
    }

    #[test]
    #[should_panic(expected = "lo 3 > hi 2")]
    fn next_inclusive_panics_on_inverted_range() {
        Xorshift64::new(1).next_inclusive(3, 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_range_in_bounds_for_saturation_ranges(
                seed: u64,
                lo in 0.0_f64..1.0,
                width in 1e-6_f64..1.0,
            ) {
                let hi = lo + width;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(lo, hi);
                    prop_assert!(v >= lo && v <= hi, "next_range({lo}, {hi}) = {v}");
                }
            }

            #[test]
            fn next_inclusive_in_bounds(seed: u64, lo in 0_u64..1000, span in 0_u64..1000) {
                let hi = lo + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_inclusive(lo, hi);
                    prop_assert!(v >= lo && v <= hi, "next_inclusive({lo}, {hi}) = {v}");
                }
            }

            #[test]
            fn next_f64_is_roughly_uniform(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.next_f64() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count} for seed {seed}");
                }
            }
        }
    }
}
