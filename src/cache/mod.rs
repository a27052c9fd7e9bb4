//! Caching subsystem.
//!
//! Two layers:
//!
//! - [`BoundedCache`] — the leaf container: a fixed-capacity map with
//!   deterministic insertion-order (FIFO) eviction. Not internally
//!   synchronized; the owner serializes access.
//!
//! - [`source::SourceCaches`] — the per-source pair of bounded caches
//!   (resolved entries + directory listings) that a content provider owns
//!   and mutates for its lifetime. This layer adds the owner-side locking
//!   and emits cache hit/miss metrics.
//!
//! Capacities come from [`CacheConfig`]; a negative configured capacity is
//! rejected at construction with [`HuginnError::Configuration`].

pub mod source;

pub use source::SourceCaches;

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use crate::error::{HuginnError, Result};

/// Default maximum number of resolved entries cached per source.
const DEFAULT_ENTRY_CAPACITY: i64 = 50;

/// Default maximum number of directory listings cached per source.
const DEFAULT_LIST_CAPACITY: i64 = 20;

/// Configuration for one source's cache pair.
///
/// Capacities are signed because they typically arrive from external
/// configuration; negative values are rejected when the caches are built.
/// Zero is legal and yields a cache that never retains anything.
///
/// ```rust
/// # use huginn::CacheConfig;
/// let config = CacheConfig::new()
///     .entry_capacity(200)
///     .list_capacity(40);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached resolved entries. Default: 50.
    pub entry_capacity: i64,
    /// Maximum number of cached directory listings. Default: 20.
    pub list_capacity: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_capacity: DEFAULT_ENTRY_CAPACITY,
            list_capacity: DEFAULT_LIST_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a config with default capacities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry cache capacity.
    pub fn entry_capacity(mut self, n: i64) -> Self {
        self.entry_capacity = n;
        self
    }

    /// Set the list cache capacity.
    pub fn list_capacity(mut self, n: i64) -> Self {
        self.list_capacity = n;
        self
    }
}

/// Fixed-capacity map with insertion-order (FIFO) eviction.
///
/// When inserting a new key would exceed the capacity, the oldest-inserted
/// entry currently present is removed first. Updating an existing key
/// replaces its value but does NOT reset its position — eviction order is
/// pure insertion order, not access or update order.
///
/// The capacity is fixed at construction. Capacity 0 is a valid degenerate
/// configuration: every `put` is dropped and the cache stays empty.
///
/// # Equality
///
/// Two caches are equal iff they have the same capacity AND hold equal
/// entries. The capacity is part of the value identity: identical contents
/// under different capacities compare unequal. `Hash` is consistent with
/// this — see [`BoundedCache::hash`](std::hash::Hash).
///
/// # Concurrency
///
/// Not internally synchronized. The component that owns an instance is
/// responsible for serializing concurrent access to it (see
/// [`SourceCaches`]); only the registry-level collection of owners is
/// concurrency-safe.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`HuginnError::Configuration`] if `capacity` is negative.
    pub fn new(capacity: i64) -> Result<Self> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            HuginnError::Configuration(format!("cache capacity must not be negative: {capacity}"))
        })?;
        Ok(Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        })
    }

    /// Look up the value associated with `key`.
    ///
    /// Returns `None` on a miss. A lookup never changes eviction order.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    /// Whether `key` is currently held.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Insert or update an association.
    ///
    /// An existing key keeps its insertion-order position; only its value is
    /// replaced. A new key is appended, and if that would exceed the
    /// capacity the oldest-inserted entry is evicted first.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            // Degenerate configuration: nothing is ever retained.
            return;
        }
        if self.entries.insert(key.clone(), value).is_some() {
            return;
        }
        self.order.push_back(key);
        if self.entries.len() > self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
    }

    /// Remove `key` if present, returning whether a removal occurred.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| k.borrow() != key);
        true
    }

    /// Number of entries currently held. Always `<= capacity()`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries this cache retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> PartialEq for BoundedCache<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.entries == other.entries
    }
}

impl<K, V> Eq for BoundedCache<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> Hash for BoundedCache<K, V>
where
    K: Eq + Hash,
    V: Hash,
{
    /// Hash over `(capacity, entries)`, consistent with [`PartialEq`].
    ///
    /// Equality ignores insertion order, so per-entry hashes are combined
    /// with a commutative wrapping sum before feeding the outer hasher.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.capacity.hash(state);
        let mut combined: u64 = 0;
        for (key, value) in &self.entries {
            let mut entry_hasher = DefaultHasher::new();
            key.hash(&mut entry_hasher);
            value.hash(&mut entry_hasher);
            combined = combined.wrapping_add(entry_hasher.finish());
        }
        combined.hash(state);
    }
}
