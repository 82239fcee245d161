//! Xoroshiro128++ generator.

use crate::random::Random;

const GOLDEN_RATIO_64: u64 = 0x9E37_79B9_7F4A_7C15;
const SILVER_RATIO_64: u64 = 0x6A09_E667_F3BC_C909;

/// Stafford variant 13 of the `SplitMix64` finalizer.
#[inline]
const fn mix_stafford13(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Xoroshiro128++ with a 64 to 128 bit seed upgrade.
///
/// Small neighbouring seeds (which is what lattice hashes produce) are spread
/// over the whole state by the stafford13 mix, so adjacent lattice points get
/// unrelated gradients.
#[derive(Debug, Clone)]
pub struct Xoroshiro {
    lo: u64,
    hi: u64,
}

impl Xoroshiro {
    /// Creates a generator from a raw 128-bit state.
    ///
    /// An all-zero state would only ever yield zeros, so it is replaced with a fixed one.
    #[must_use]
    pub const fn from_state(lo: u64, hi: u64) -> Self {
        if lo | hi == 0 {
            Self {
                lo: GOLDEN_RATIO_64,
                hi: SILVER_RATIO_64,
            }
        } else {
            Self { lo, hi }
        }
    }
}

impl Random for Xoroshiro {
    fn from_seed(seed: u64) -> Self {
        let lo = seed ^ SILVER_RATIO_64;
        let hi = lo.wrapping_add(GOLDEN_RATIO_64);
        Self::from_state(mix_stafford13(lo), mix_stafford13(hi))
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let s0 = self.lo;
        let mut s1 = self.hi;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);

        s1 ^= s0;
        self.lo = s0.rotate_left(49) ^ s1 ^ (s1 << 21);
        self.hi = s1.rotate_left(28);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Xoroshiro::from_seed(777);
        let mut b = Xoroshiro::from_seed(777);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_neighbouring_seeds_diverge() {
        let mut a = Xoroshiro::from_seed(1);
        let mut b = Xoroshiro::from_seed(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_zero_state_is_replaced() {
        let mut rng = Xoroshiro::from_state(0, 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_next_f64_between_bounds() {
        let mut rng = Xoroshiro::from_seed(42);
        for _ in 0..10_000 {
            let v = rng.next_f64_between(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&v), "{v} escaped [-1, 1)");
        }
    }
}
