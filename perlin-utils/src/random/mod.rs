//! Deterministic random sources.
//!
//! Gradient sampling must be reproducible from a seed alone and must never touch
//! a shared generator, so every draw owns its own [`Random`] instance.

pub mod xoroshiro;

/// A seedable source of pseudo-random numbers.
pub trait Random {
    /// Creates a generator from a 64-bit seed.
    fn from_seed(seed: u64) -> Self
    where
        Self: Sized;

    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        // 53 high bits fill the mantissa
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed value in `[low, high)`.
    fn next_f64_between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}
