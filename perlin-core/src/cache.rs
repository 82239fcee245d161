//! Cache of constructed lattice gradients.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use perlin_utils::math::Corner;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::error::Result;
use crate::lattice::GradientLattice;

/// Lattice corner plus the caller's (unscaled) tile sizes.
///
/// Octaves are fixed per field, so the unscaled tiles identify the scaled ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Integer corner coordinates.
    pub corner: Corner,
    /// Tile sizes the corner was evaluated under, if any.
    pub tile_sizes: Option<SmallVec<[u32; 4]>>,
}

/// Hit and miss counters of a [`GradientCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that had to construct a gradient.
    pub misses: u64,
}

/// LRU cache of gradients, safe to share between threads.
///
/// Entries are immutable and can always be rebuilt from their key and the field
/// seed, so eviction only costs time. Two threads missing the same key at once
/// both build it and the later insert wins; both values are identical.
pub struct GradientCache {
    entries: Mutex<LruCache<CacheKey, Arc<GradientLattice>, FxBuildHasher>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GradientCache {
    /// Capacity used when none is configured.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a cache holding at most `capacity` gradients.
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self::from_lru(LruCache::with_hasher(capacity, FxBuildHasher::default()))
    }

    /// Creates a cache that never evicts.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::from_lru(LruCache::unbounded_with_hasher(FxBuildHasher::default()))
    }

    fn from_lru(lru: LruCache<CacheKey, Arc<GradientLattice>, FxBuildHasher>) -> Self {
        Self {
            entries: Mutex::new(lru),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached gradient for `key`, building and inserting it on a miss.
    ///
    /// `build` runs without holding the lock.
    pub fn get_or_try_insert_with<F>(&self, key: CacheKey, build: F) -> Result<Arc<GradientLattice>>
    where
        F: FnOnce(&CacheKey) -> Result<GradientLattice>,
    {
        if let Some(hit) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(hit));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::trace!("gradient cache miss at {:?}", key.corner);
        let lattice = Arc::new(build(&key)?);
        self.entries.lock().put(key, Arc::clone(&lattice));
        Ok(lattice)
    }

    /// Number of cached gradients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no gradients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of gradients kept, `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        let cap = self.entries.lock().cap();
        // lru reports `usize::MAX` for unbounded caches
        (cap.get() != usize::MAX).then_some(cap)
    }

    /// Hit and miss counts since creation or the last [`Self::clear`].
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drops every cached gradient and resets the counters.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl fmt::Debug for GradientCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn key(corner: Corner) -> CacheKey {
        CacheKey {
            corner,
            tile_sizes: None,
        }
    }

    fn build(key: &CacheKey) -> Result<GradientLattice> {
        Ok(GradientLattice::new(key.corner.clone(), 17))
    }

    #[test]
    fn test_hit_returns_same_entry() {
        let cache = GradientCache::unbounded();
        let a = cache.get_or_try_insert_with(key(smallvec![1, 2]), build).unwrap();
        let b = cache.get_or_try_insert_with(key(smallvec![1, 2]), build).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), None);
    }

    #[test]
    fn test_tiles_are_part_of_key() {
        let cache = GradientCache::unbounded();
        cache.get_or_try_insert_with(key(smallvec![0]), build).unwrap();
        let tiled = CacheKey {
            corner: smallvec![0],
            tile_sizes: Some(smallvec![4]),
        };
        cache.get_or_try_insert_with(tiled, build).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_bounded_evicts_least_recent() {
        let cache = GradientCache::bounded(NonZeroUsize::new(2).unwrap());
        cache.get_or_try_insert_with(key(smallvec![0]), build).unwrap();
        cache.get_or_try_insert_with(key(smallvec![1]), build).unwrap();
        cache.get_or_try_insert_with(key(smallvec![2]), build).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), NonZeroUsize::new(2));

        // [0] was evicted and gets rebuilt identically
        let rebuilt = cache.get_or_try_insert_with(key(smallvec![0]), build).unwrap();
        assert_eq!(*rebuilt, GradientLattice::new(smallvec![0], 17));
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let cache = GradientCache::unbounded();
        let result = cache.get_or_try_insert_with(key(smallvec![5]), |_| {
            Err(crate::NoiseError::InvalidArgument("boom".into()))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = GradientCache::unbounded();
        cache.get_or_try_insert_with(key(smallvec![3]), build).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
