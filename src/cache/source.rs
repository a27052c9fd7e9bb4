//! Per-source cache pair.
//!
//! Each managed content source owns one [`SourceCaches`]: an entry cache
//! mapping content identifiers to their resolved storage locations, and a
//! list cache mapping identifiers to the ordered names of their children.
//! The two capacities are configured independently via
//! [`CacheConfig`](super::CacheConfig).
//!
//! [`BoundedCache`] itself is not synchronized; this layer is where the
//! owner-side serialization lives. Each cache sits behind its own `Mutex`,
//! so the resolver can mutate while the reporting side reads occupancy
//! without any further caller-side locking.
//!
//! Lookup accessors emit cache hit/miss counters (see [`crate::telemetry`]).

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::{BoundedCache, CacheConfig};
use crate::error::Result;
use crate::report::CacheUsage;
use crate::telemetry;

/// The pair of bounded caches owned by one managed source.
pub struct SourceCaches {
    entries: Mutex<BoundedCache<String, String>>,
    listings: Mutex<BoundedCache<String, Vec<String>>>,
}

/// Lock a cache, recovering from poisoning.
///
/// Occupancy reads must succeed against any valid state, so a panic in
/// another thread that held the lock is not allowed to take reporting down
/// with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SourceCaches {
    /// Build the cache pair from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HuginnError::Configuration`](crate::HuginnError::Configuration)
    /// if either configured capacity is negative.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        Ok(Self {
            entries: Mutex::new(BoundedCache::new(config.entry_capacity)?),
            listings: Mutex::new(BoundedCache::new(config.list_capacity)?),
        })
    }

    /// Build the cache pair with default capacities.
    pub fn with_defaults() -> Self {
        Self::new(&CacheConfig::default()).expect("default capacities are non-negative")
    }

    /// Look up the resolved storage location for `identifier`.
    ///
    /// Returns `None` on a miss. Emits hit/miss metrics.
    pub fn entry(&self, identifier: &str) -> Option<String> {
        let hit = lock(&self.entries).get(identifier).cloned();
        record_lookup("entry", hit.is_some());
        hit
    }

    /// Cache the resolved storage location for `identifier`.
    pub fn store_entry(&self, identifier: impl Into<String>, location: impl Into<String>) {
        lock(&self.entries).put(identifier.into(), location.into());
    }

    /// Drop the cached entry for `identifier`, reporting whether one existed.
    pub fn remove_entry(&self, identifier: &str) -> bool {
        lock(&self.entries).remove(identifier)
    }

    /// Look up the cached child listing for `identifier`.
    ///
    /// Returns `None` on a miss. Emits hit/miss metrics.
    pub fn listing(&self, identifier: &str) -> Option<Vec<String>> {
        let hit = lock(&self.listings).get(identifier).cloned();
        record_lookup("list", hit.is_some());
        hit
    }

    /// Cache the ordered child names for `identifier`.
    pub fn store_listing(&self, identifier: impl Into<String>, children: Vec<String>) {
        lock(&self.listings).put(identifier.into(), children);
    }

    /// Drop the cached listing for `identifier`, reporting whether one existed.
    pub fn remove_listing(&self, identifier: &str) -> bool {
        lock(&self.listings).remove(identifier)
    }

    /// Point-in-time occupancy of the entry cache.
    pub fn entry_usage(&self) -> CacheUsage {
        let cache = lock(&self.entries);
        CacheUsage {
            size: cache.len(),
            capacity: cache.capacity(),
        }
    }

    /// Point-in-time occupancy of the list cache.
    pub fn listing_usage(&self) -> CacheUsage {
        let cache = lock(&self.listings);
        CacheUsage {
            size: cache.len(),
            capacity: cache.capacity(),
        }
    }
}

/// Record a hit or miss counter for one cache of the pair.
fn record_lookup(cache: &'static str, hit: bool) {
    let name = if hit {
        telemetry::CACHE_HITS_TOTAL
    } else {
        telemetry::CACHE_MISSES_TOTAL
    };
    metrics::counter!(name, "cache" => cache).increment(1);
}
