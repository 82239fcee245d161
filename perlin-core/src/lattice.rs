//! Gradient vectors anchored at integer lattice points.

use perlin_utils::math::{Corner, dot, fade};
use perlin_utils::random::{Random, xoroshiro::Xoroshiro};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{NoiseError, Result};

/// A real valued vector, inline for up to four dimensions.
pub type Vector = SmallVec<[f64; 4]>;

/// How a freshly drawn gradient is rescaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientScaling {
    /// Keep the raw uniform draw from `[-1, 1)`.
    ///
    /// Appending zero coordinates to a point leaves its noise value unchanged,
    /// because the first draws of a seed do not depend on how many follow.
    #[default]
    Unscaled,
    /// Rescale to Euclidean length `sqrt(D)`.
    ///
    /// Values can leave `[-1, 1]` from three dimensions upward, and padding a
    /// point with zeros changes its value.
    RootDimension,
}

/// Draws a `dimensions` long gradient from a generator seeded with `seed`.
///
/// The generator is local to this call; nothing outside it observes the draw.
#[must_use]
pub fn sample_vector(dimensions: usize, seed: u64, scaling: GradientScaling) -> Vector {
    let mut rng = Xoroshiro::from_seed(seed);
    let mut vector: Vector = (0..dimensions)
        .map(|_| rng.next_f64_between(-1.0, 1.0))
        .collect();

    if scaling == GradientScaling::RootDimension {
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            let factor = (dimensions as f64).sqrt() / norm;
            for v in &mut vector {
                *v *= factor;
            }
        }
    }
    vector
}

/// A pseudo-random gradient anchored at one lattice corner.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLattice {
    coordinates: Corner,
    gradient: Vector,
}

impl GradientLattice {
    /// Creates the lattice point at `coordinates` with an unscaled gradient.
    #[must_use]
    pub fn new(coordinates: Corner, seed: u64) -> Self {
        Self::with_scaling(coordinates, seed, GradientScaling::default())
    }

    /// Creates the lattice point at `coordinates` with the given gradient scaling.
    #[must_use]
    pub fn with_scaling(coordinates: Corner, seed: u64, scaling: GradientScaling) -> Self {
        let gradient = sample_vector(coordinates.len(), seed, scaling);
        Self {
            coordinates,
            gradient,
        }
    }

    /// The integer corner this gradient is anchored at.
    #[must_use]
    pub fn coordinates(&self) -> &[i64] {
        &self.coordinates
    }

    /// The gradient vector.
    #[must_use]
    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }

    /// Dimensionality of this lattice point.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    /// Offset from this corner to `point`, per dimension.
    pub fn distance_to(&self, point: &[f64]) -> Result<Vector> {
        if point.len() != self.coordinates.len() {
            return Err(NoiseError::LengthMismatch {
                left: point.len(),
                right: self.coordinates.len(),
            });
        }
        Ok(point
            .iter()
            .zip(&self.coordinates)
            .map(|(p, &c)| p - c as f64)
            .collect())
    }

    /// Interpolation weight of this corner for `point`.
    ///
    /// `point` must lie in a cell touching this corner, so every distance is in `[-1, 1]`.
    pub fn weight_to(&self, point: &[f64]) -> Result<f64> {
        corner_weight(&self.distance_to(point)?)
    }

    /// Contribution of this corner to the noise value at `point`.
    pub fn weighted_contribution(&self, point: &[f64]) -> Result<f64> {
        let distance = self.distance_to(point)?;
        Ok(corner_weight(&distance)? * dot(&self.gradient, &distance)?)
    }
}

/// Product of the fade curve over `1 - |d|` for every component of `distance`.
fn corner_weight(distance: &[f64]) -> Result<f64> {
    distance
        .iter()
        .try_fold(1.0, |weight, d| -> Result<f64> {
            Ok(weight * fade(1.0 - d.abs())?)
        })
}
