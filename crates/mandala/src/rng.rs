//! Seedable random source threaded through the generators.
//!
//! Nothing in this crate reads ambient randomness. Every generator that
//! needs noise (sub-rotations, star jitter, palette hues) takes a `&mut Rng`,
//! so a pattern is fully determined by its config and seed.

use std::f64::consts::TAU;

/// A fast, deterministic pseudo-random number generator.
///
/// Linear Congruential Generator with the Numerical Recipes / PCG multiplier.
/// Statistically plain, but plenty for picking rotations and hues.
///
/// # Example
/// ```
/// use mandala::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let angle = rng.next_angle(); // [0, 2π)
/// assert!(angle >= 0.0 && angle < std::f64::consts::TAU);
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Random f64 in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // High bits have the better period in an LCG
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Random f64 in [-1, 1).
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Random f64 in [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Random rotation in [0, 2π).
    #[inline]
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }

    /// Random index in [0, len). `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index needs a non-empty range");
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Random integer in [lo, hi], both ends inclusive.
    #[inline]
    pub fn next_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi);
        lo + self.next_index(hi - lo + 1)
    }

    /// Pick one element of a non-empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_index(items.len())]
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut rng1 = Rng::new(1);
        let mut rng2 = Rng::new(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn angle_in_range() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            let a = rng.next_angle();
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn signed_in_range() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            let v = rng.next_signed();
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn inclusive_hits_both_ends() {
        let mut rng = Rng::new(7);
        let draws: Vec<usize> = (0..2000).map(|_| rng.next_inclusive(5, 12)).collect();
        assert!(draws.iter().all(|v| (5..=12).contains(v)));
        assert!(draws.contains(&5));
        assert!(draws.contains(&12));
    }

    #[test]
    fn choose_stays_in_slice() {
        let mut rng = Rng::new(99);
        let sides = [6usize, 8, 12];
        for _ in 0..100 {
            assert!(sides.contains(rng.choose(&sides)));
        }
    }
}
