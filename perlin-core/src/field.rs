//! The noise field: lattice lookup, caching and summation.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use perlin_utils::math::{Corners, floor, lattice_hash};
use smallvec::SmallVec;

use crate::cache::{CacheKey, GradientCache};
use crate::config::NoiseConfig;
use crate::error::{NoiseError, Result};
use crate::lattice::{GradientLattice, GradientScaling};
use crate::point::{IntoPoint, IntoTileSizes, Point, TileSizes};

/// Range a seed is drawn from when none is given.
const RANDOM_SEED_RANGE: RangeInclusive<u64> = 1..=100_000;

/// Largest octave scaled coordinate magnitude. Beyond it `f64` cannot tell
/// neighbouring lattice points apart.
const MAX_SCALED_COORDINATE: f64 = 9_007_199_254_740_992.0;

/// Gradient noise over an N-dimensional continuous space.
///
/// Every evaluation visits the `2^D` corners of the lattice cell around the
/// octave scaled point. Each corner owns a gradient seeded by
/// `seed * lattice_hash(corner)`, and the result is the fade-weighted sum of the
/// corner contributions. Values stay in roughly `[-1, 1]`.
///
/// The field is `Sync`; one instance can be shared by many threads.
#[derive(Debug)]
pub struct NoiseField {
    octaves: f64,
    seed: u64,
    scaling: GradientScaling,
    dimensions: OnceLock<usize>,
    cache: GradientCache,
}

impl NoiseField {
    /// Largest supported dimensionality. A single evaluation visits `2^D` corners.
    pub const MAX_DIMENSIONS: usize = 32;

    /// Creates a field with the default cache and gradient scaling.
    ///
    /// A seed in `1..=100000` is drawn when `seed` is `None`.
    pub fn new(octaves: f64, seed: Option<u64>) -> Result<Self> {
        Self::builder().octaves(octaves).maybe_seed(seed).build()
    }

    /// Starts building a field from default settings.
    #[must_use]
    pub fn builder() -> NoiseFieldBuilder {
        NoiseFieldBuilder::default()
    }

    /// Creates a field from deserialized settings.
    pub fn from_config(config: &NoiseConfig) -> Result<Self> {
        NoiseFieldBuilder {
            config: config.clone(),
        }
        .build()
    }

    /// Spatial frequency multiplier.
    #[must_use]
    pub const fn octaves(&self) -> f64 {
        self.octaves
    }

    /// Field seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Gradient length mode.
    #[must_use]
    pub const fn scaling(&self) -> GradientScaling {
        self.scaling
    }

    /// Dimensionality, once fixed by construction or the first evaluation.
    #[must_use]
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions.get().copied()
    }

    /// The gradient cache backing this field.
    #[must_use]
    pub const fn cache(&self) -> &GradientCache {
        &self.cache
    }

    /// Noise value at `point`.
    pub fn evaluate(&self, point: impl IntoPoint) -> Result<f64> {
        self.sample(point.into_point(), None)
    }

    /// Noise value at `point` on a field repeating every `tile_sizes` units per dimension.
    ///
    /// Each coordinate is wrapped into its period before octave scaling, and
    /// corners are hashed modulo the scaled period. Seamless wrapping therefore
    /// needs `tile * octaves` to be a whole number.
    pub fn evaluate_tiled(
        &self,
        point: impl IntoPoint,
        tile_sizes: impl IntoTileSizes,
    ) -> Result<f64> {
        self.sample(point.into_point(), Some(tile_sizes.into_tile_sizes()))
    }

    fn sample(&self, mut point: Point, tile_sizes: Option<TileSizes>) -> Result<f64> {
        self.check_point(&point)?;

        let scaled_tiles: Option<SmallVec<[f64; 4]>> = match &tile_sizes {
            Some(tiles) => {
                if tiles.len() != point.len() {
                    return Err(NoiseError::DimensionMismatch {
                        what: "tile sizes",
                        expected: point.len(),
                        actual: tiles.len(),
                    });
                }
                if let Some(index) = tiles.iter().position(|&tile| tile == 0) {
                    return Err(NoiseError::InvalidArgument(format!(
                        "tile size {index} must be positive"
                    )));
                }
                for (coordinate, &tile) in point.iter_mut().zip(tiles) {
                    *coordinate = coordinate.rem_euclid(f64::from(tile));
                }
                Some(
                    tiles
                        .iter()
                        .map(|&tile| f64::from(tile) * self.octaves)
                        .collect(),
                )
            }
            None => None,
        };

        for (index, coordinate) in point.iter_mut().enumerate() {
            *coordinate *= self.octaves;
            if coordinate.abs() > MAX_SCALED_COORDINATE {
                return Err(NoiseError::InvalidArgument(format!(
                    "coordinate {index} is {coordinate} after octave scaling, \
                     beyond the largest lattice magnitude {MAX_SCALED_COORDINATE}"
                )));
            }
        }

        let base: SmallVec<[i64; 4]> = point.iter().map(|&c| floor(c)).collect();
        let corners = Corners::new(&base).ok_or_else(|| {
            NoiseError::InvalidArgument(format!("cell at {base:?} cannot be enumerated"))
        })?;

        let mut total = 0.0;
        for corner in corners {
            let key = CacheKey {
                corner,
                tile_sizes: tile_sizes.clone(),
            };
            let lattice = self.cache.get_or_try_insert_with(key, |key| {
                let hash = lattice_hash(&key.corner, scaled_tiles.as_deref())?;
                Ok(GradientLattice::with_scaling(
                    key.corner.clone(),
                    self.seed.wrapping_mul(hash),
                    self.scaling,
                ))
            })?;
            total += lattice.weighted_contribution(&point)?;
        }
        Ok(total)
    }

    /// Validates coordinates and fixes the dimensionality on first use.
    fn check_point(&self, point: &[f64]) -> Result<()> {
        if point.is_empty() {
            return Err(NoiseError::InvalidArgument(
                "point must have at least one coordinate".to_string(),
            ));
        }
        if let Some((index, &value)) = point.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(NoiseError::TypeMismatch { index, value });
        }
        if point.len() > Self::MAX_DIMENSIONS {
            return Err(NoiseError::InvalidArgument(format!(
                "at most {} dimensions are supported, got {}",
                Self::MAX_DIMENSIONS,
                point.len()
            )));
        }

        let expected = *self.dimensions.get_or_init(|| point.len());
        if expected != point.len() {
            return Err(NoiseError::DimensionMismatch {
                what: "point",
                expected,
                actual: point.len(),
            });
        }
        Ok(())
    }
}

/// Builder for [`NoiseField`].
#[derive(Debug, Clone, Default)]
pub struct NoiseFieldBuilder {
    config: NoiseConfig,
}

impl NoiseFieldBuilder {
    /// Spatial frequency multiplier. Must be positive.
    #[must_use]
    pub fn octaves(mut self, octaves: f64) -> Self {
        self.config.octaves = octaves;
        self
    }

    /// Fixed field seed. Must be positive.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Fixed field seed, or a random one for `None`.
    #[must_use]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Locks the dimensionality before the first evaluation.
    #[must_use]
    pub fn dimensions(mut self, dimensions: usize) -> Self {
        self.config.dimensions = Some(dimensions);
        self
    }

    /// Gradient length mode.
    #[must_use]
    pub fn scaling(mut self, scaling: GradientScaling) -> Self {
        self.config.scaling = scaling;
        self
    }

    /// Keeps at most `capacity` gradients cached.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache.capacity = capacity;
        self.config.cache.unbounded = false;
        self
    }

    /// Never evicts cached gradients.
    #[must_use]
    pub fn unbounded_cache(mut self) -> Self {
        self.config.cache.unbounded = true;
        self
    }

    /// Validates the settings and creates the field.
    pub fn build(self) -> Result<NoiseField> {
        let config = self.config;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| {
            let seed = rand::random_range(RANDOM_SEED_RANGE);
            log::debug!("no noise seed configured, drew {seed}");
            seed
        });

        let cache = if config.cache.unbounded {
            GradientCache::unbounded()
        } else {
            let capacity = NonZeroUsize::new(config.cache.capacity).ok_or_else(|| {
                NoiseError::InvalidArgument("cache capacity must be non-zero".to_string())
            })?;
            GradientCache::bounded(capacity)
        };

        let dimensions = config.dimensions.map_or_else(OnceLock::new, OnceLock::from);

        log::debug!(
            "noise field created (octaves {}, seed {seed}, {:?} gradients, cache {:?})",
            config.octaves,
            config.scaling,
            cache.capacity()
        );

        Ok(NoiseField {
            octaves: config.octaves,
            seed,
            scaling: config.scaling,
            dimensions,
            cache,
        })
    }
}
