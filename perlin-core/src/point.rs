//! Conversions from caller input into query points and tile sizes.

use smallvec::SmallVec;

/// A query point, inline for up to four dimensions.
pub type Point = SmallVec<[f64; 4]>;

/// Tile periods, one per dimension.
pub type TileSizes = SmallVec<[u32; 4]>;

/// Anything that can be evaluated as a noise coordinate.
///
/// Scalars become one-dimensional points.
pub trait IntoPoint {
    /// Converts `self` into a point.
    fn into_point(self) -> Point;
}

impl IntoPoint for f64 {
    fn into_point(self) -> Point {
        SmallVec::from_slice(&[self])
    }
}

impl IntoPoint for f32 {
    fn into_point(self) -> Point {
        SmallVec::from_slice(&[f64::from(self)])
    }
}

impl IntoPoint for i32 {
    fn into_point(self) -> Point {
        SmallVec::from_slice(&[f64::from(self)])
    }
}

impl IntoPoint for &[f64] {
    fn into_point(self) -> Point {
        SmallVec::from_slice(self)
    }
}

impl IntoPoint for &Vec<f64> {
    fn into_point(self) -> Point {
        SmallVec::from_slice(self)
    }
}

impl IntoPoint for Vec<f64> {
    fn into_point(self) -> Point {
        SmallVec::from_vec(self)
    }
}

impl<const N: usize> IntoPoint for [f64; N] {
    fn into_point(self) -> Point {
        SmallVec::from_slice(&self)
    }
}

impl<const N: usize> IntoPoint for &[f64; N] {
    fn into_point(self) -> Point {
        SmallVec::from_slice(self)
    }
}

impl IntoPoint for Point {
    fn into_point(self) -> Point {
        self
    }
}

/// Anything that can describe per-dimension tile periods.
///
/// A single integer tiles a one-dimensional field.
pub trait IntoTileSizes {
    /// Converts `self` into tile sizes.
    fn into_tile_sizes(self) -> TileSizes;
}

impl IntoTileSizes for u32 {
    fn into_tile_sizes(self) -> TileSizes {
        SmallVec::from_slice(&[self])
    }
}

impl IntoTileSizes for &[u32] {
    fn into_tile_sizes(self) -> TileSizes {
        SmallVec::from_slice(self)
    }
}

impl IntoTileSizes for Vec<u32> {
    fn into_tile_sizes(self) -> TileSizes {
        SmallVec::from_vec(self)
    }
}

impl<const N: usize> IntoTileSizes for [u32; N] {
    fn into_tile_sizes(self) -> TileSizes {
        SmallVec::from_slice(&self)
    }
}

impl<const N: usize> IntoTileSizes for &[u32; N] {
    fn into_tile_sizes(self) -> TileSizes {
        SmallVec::from_slice(self)
    }
}
