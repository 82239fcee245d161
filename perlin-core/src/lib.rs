//! N-dimensional gradient noise.
//!
//! # Key Types
//!
//! - [`NoiseField`] - evaluates noise at arbitrary points, optionally tiled
//! - [`GradientLattice`] - the pseudo-random gradient anchored at one lattice corner
//! - [`GradientCache`] - LRU cache of constructed gradients shared by evaluations
//! - [`NoiseConfig`] - serializable field settings
//!
//! ```
//! use perlin_core::NoiseField;
//!
//! let noise = NoiseField::new(3.0, Some(777))?;
//! let value = noise.evaluate([0.25, 0.5])?;
//! assert!((-1.0..=1.0).contains(&value));
//!
//! // Repeats every 2 units along x and 3 along y
//! let tiled = noise.evaluate_tiled([2.25, 3.5], [2, 3])?;
//! assert_eq!(tiled, noise.evaluate([0.25, 0.5])?);
//! # Ok::<(), perlin_core::NoiseError>(())
//! ```

pub mod cache;
pub mod config;
mod error;
mod field;
pub mod lattice;
pub mod point;

pub use cache::{CacheStats, GradientCache};
pub use config::{CacheConfig, NoiseConfig};
pub use error::{NoiseError, Result};
pub use field::{NoiseField, NoiseFieldBuilder};
pub use lattice::{GradientLattice, GradientScaling};
pub use point::{IntoPoint, IntoTileSizes, Point, TileSizes};
pub use perlin_utils::math::fade;
