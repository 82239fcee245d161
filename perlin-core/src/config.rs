//! Serializable settings for building a [`crate::NoiseField`].

use serde::{Deserialize, Serialize};

use crate::cache::GradientCache;
use crate::error::{NoiseError, Result};
use crate::field::NoiseField;
use crate::lattice::GradientScaling;

/// Settings of a noise field.
///
/// Missing keys fall back to their defaults, so an empty document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Spatial frequency multiplier. Must be positive.
    pub octaves: f64,
    /// Field seed. A random one in `1..=100000` is drawn when unset.
    pub seed: Option<u64>,
    /// Dimensionality to enforce from the start. Otherwise fixed by the first point.
    pub dimensions: Option<usize>,
    /// Gradient length mode.
    pub scaling: GradientScaling,
    /// Gradient cache settings.
    pub cache: CacheConfig,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1.0,
            seed: None,
            dimensions: None,
            scaling: GradientScaling::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl NoiseConfig {
    /// Checks every value that would make field construction fail.
    pub fn validate(&self) -> Result<()> {
        if !(self.octaves.is_finite() && self.octaves > 0.0) {
            return Err(NoiseError::InvalidArgument(format!(
                "octaves expected to be a positive number, got {}",
                self.octaves
            )));
        }
        if self.seed == Some(0) {
            return Err(NoiseError::InvalidArgument(
                "seed expected to be a positive integer, got 0".to_string(),
            ));
        }
        if let Some(dimensions) = self.dimensions {
            if !(1..=NoiseField::MAX_DIMENSIONS).contains(&dimensions) {
                return Err(NoiseError::InvalidArgument(format!(
                    "dimensions expected to be in 1..={}, got {dimensions}",
                    NoiseField::MAX_DIMENSIONS
                )));
            }
        }
        if !self.cache.unbounded && self.cache.capacity == 0 {
            return Err(NoiseError::InvalidArgument(
                "cache capacity must be non-zero; use `unbounded` to disable eviction".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gradient cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached gradients.
    pub capacity: usize,
    /// Never evict. Overrides `capacity`.
    pub unbounded: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: GradientCache::DEFAULT_CAPACITY,
            unbounded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = NoiseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.scaling, GradientScaling::Unscaled);
    }

    #[test]
    fn test_parse_partial_json5() {
        let config: NoiseConfig = serde_json5::from_str(
            r#"{
                // comments are allowed
                octaves: 4.6,
                seed: 777,
                scaling: "root_dimension",
                cache: { unbounded: true },
            }"#,
        )
        .unwrap();
        assert!((config.octaves - 4.6).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(777));
        assert_eq!(config.scaling, GradientScaling::RootDimension);
        assert!(config.cache.unbounded);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.dimensions, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            NoiseConfig {
                octaves: 0.0,
                ..Default::default()
            },
            NoiseConfig {
                octaves: f64::NAN,
                ..Default::default()
            },
            NoiseConfig {
                seed: Some(0),
                ..Default::default()
            },
            NoiseConfig {
                dimensions: Some(0),
                ..Default::default()
            },
            NoiseConfig {
                cache: CacheConfig {
                    capacity: 0,
                    unbounded: false,
                },
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(NoiseError::InvalidArgument(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
