//! Math helpers shared by the gradient lattice and the noise field.

use smallvec::SmallVec;

use crate::MathError;

/// Corner coordinates of a lattice cell. Inline for up to four dimensions.
pub type Corner = SmallVec<[i64; 4]>;

/// Floor of `value` as a lattice coordinate.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i64 {
    value.floor() as i64
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
///
/// Only defined on `[0, 1]`. Distances inside a lattice cell always land in that
/// band, so anything else (including NaN) means the caller computed a bad distance.
#[inline]
pub fn fade(t: f64) -> Result<f64, MathError> {
    if !(0.0..=1.0).contains(&t) {
        return Err(MathError::OutOfRange(t));
    }
    Ok(t * t * t * (t * (t * 6.0 - 15.0) + 10.0))
}

/// Dot product of two equally sized vectors.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, MathError> {
    if a.len() != b.len() {
        return Err(MathError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Seed diversification hash of a lattice corner.
///
/// With `tile_sizes`, every coordinate is first wrapped into its (octave scaled)
/// period so corners on opposite edges of a tile hash identically. The result is
/// `|dot([10^0, 10^1, ..], corner)| + 1`, truncated, and never below 1.
pub fn lattice_hash(corner: &[i64], tile_sizes: Option<&[f64]>) -> Result<u64, MathError> {
    let wrapped: SmallVec<[f64; 4]> = match tile_sizes {
        Some(tiles) => {
            if tiles.len() != corner.len() {
                return Err(MathError::LengthMismatch {
                    left: corner.len(),
                    right: tiles.len(),
                });
            }
            corner
                .iter()
                .zip(tiles)
                .map(|(&c, &tile)| (c as f64).rem_euclid(tile))
                .collect()
        }
        None => corner.iter().map(|&c| c as f64).collect(),
    };

    let mut weight = 1.0;
    let powers: SmallVec<[f64; 4]> = (0..wrapped.len())
        .map(|_| {
            let current = weight;
            weight *= 10.0;
            current
        })
        .collect();

    // `as` saturates, which is fine for a seed diversifier
    let hash = (dot(&powers, &wrapped)?.abs() + 1.0) as u64;
    Ok(hash.max(1))
}

/// Iterates the `2^D` corners of the unit hypercube whose lowest corner is `base`.
///
/// Order matches a Cartesian product of the `(low, low + 1)` pairs: the last
/// dimension varies fastest.
#[derive(Debug, Clone)]
pub struct Corners<'a> {
    base: &'a [i64],
    next: u64,
    end: u64,
}

impl<'a> Corners<'a> {
    /// Largest dimensionality that can be enumerated.
    pub const MAX_DIMENSIONS: usize = 63;

    /// Creates the iterator. Returns `None` if `base` has more than
    /// [`Self::MAX_DIMENSIONS`] coordinates, or if a far corner would overflow.
    #[must_use]
    pub fn new(base: &'a [i64]) -> Option<Self> {
        if base.len() > Self::MAX_DIMENSIONS || base.contains(&i64::MAX) {
            return None;
        }
        Some(Self {
            base,
            next: 0,
            end: 1 << base.len(),
        })
    }
}

impl Iterator for Corners<'_> {
    type Item = Corner;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;

        let dims = self.base.len();
        Some(
            self.base
                .iter()
                .enumerate()
                .map(|(i, &low)| low + ((mask >> (dims - 1 - i)) & 1) as i64)
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_fade_fixed_points() {
        assert_eq!(fade(0.0), Ok(0.0));
        assert_eq!(fade(1.0), Ok(1.0));
        assert_eq!(fade(0.5), Ok(0.5));
    }

    #[test]
    fn test_fade_is_symmetric() {
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let sum = fade(t).unwrap() + fade(1.0 - t).unwrap();
            assert!((sum - 1.0).abs() < 1e-12, "fade({t}) + fade(1 - {t}) = {sum}");
        }
    }

    #[test]
    fn test_fade_rejects_out_of_band() {
        assert_eq!(fade(-0.01), Err(MathError::OutOfRange(-0.01)));
        assert_eq!(fade(1.01), Err(MathError::OutOfRange(1.01)));
        assert!(fade(f64::NAN).is_err());
    }

    #[test]
    fn test_dot_length_mismatch() {
        assert_eq!(
            dot(&[1.0, 2.0], &[1.0]),
            Err(MathError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), Ok(32.0));
    }

    #[test]
    fn test_floor_negative() {
        assert_eq!(floor(-0.5), -1);
        assert_eq!(floor(2.999), 2);
        assert_eq!(floor(-3.0), -3);
    }

    #[test]
    fn test_lattice_hash_values() {
        assert_eq!(lattice_hash(&[0, 0], None), Ok(1));
        assert_eq!(lattice_hash(&[1, 2, 3], None), Ok(322));
        assert_eq!(lattice_hash(&[-4, 0], None), Ok(5));
    }

    #[test]
    fn test_lattice_hash_ignores_trailing_zeros() {
        assert_eq!(
            lattice_hash(&[3, 7], None),
            lattice_hash(&[3, 7, 0, 0], None)
        );
    }

    #[test]
    fn test_lattice_hash_wraps_tiles() {
        let tiles = [4.0, 3.0];
        assert_eq!(
            lattice_hash(&[4, 1], Some(&tiles)),
            lattice_hash(&[0, 1], Some(&tiles))
        );
        assert_eq!(
            lattice_hash(&[-1, 3], Some(&tiles)),
            lattice_hash(&[3, 0], Some(&tiles))
        );
        assert!(lattice_hash(&[1, 2], Some(&[4.0])).is_err());
    }

    #[test]
    fn test_corners_order() {
        let corners: Vec<Corner> = Corners::new(&[2, -1]).unwrap().collect();
        let expected: Vec<Corner> = vec![
            SmallVec::from_slice(&[2, -1]),
            SmallVec::from_slice(&[2, 0]),
            SmallVec::from_slice(&[3, -1]),
            SmallVec::from_slice(&[3, 0]),
        ];
        assert_eq!(corners, expected);
    }

    #[test]
    fn test_corners_count() {
        let base = [0i64; 10];
        let corners = Corners::new(&base).unwrap();
        assert_eq!(corners.size_hint(), (1024, Some(1024)));
        assert_eq!(corners.count(), 1024);
        assert!(Corners::new(&[0; 64]).is_none());
    }

    #[test]
    fn test_corners_reject_overflowing_base() {
        assert!(Corners::new(&[0, i64::MAX]).is_none());
        let last = Corners::new(&[i64::MAX - 1]).unwrap().last().unwrap();
        assert_eq!(&last[..], &[i64::MAX]);
    }
}
