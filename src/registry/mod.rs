//! Provider handle registry.
//!
//! The [`CacheRegistry`] tracks which cache-owning provider handles
//! currently exist while providers are added and removed at runtime. It is
//! the bridge between two independent sides:
//!
//! - a lifecycle manager that calls [`CacheRegistry::register`] /
//!   [`CacheRegistry::deregister`] as sources activate and deactivate, from
//!   whatever threads its events arrive on;
//! - a reporting side that calls [`CacheRegistry::snapshot`] and then reads
//!   each handle's occupancy with no further synchronization.
//!
//! Reporting is low-frequency and read-mostly, so the registry favours
//! copy-on-read over fine-grained locking: writers take the write lock only
//! long enough to push or remove one `Arc`, and a snapshot clones the handle
//! list under the read lock. A snapshot is therefore a self-consistent
//! point-in-time copy — possibly a few updates stale, never torn.
//!
//! Handles are tracked by reference only; the registry never owns a
//! provider's lifecycle and never copies cache contents.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::cache::SourceCaches;
use crate::telemetry;

/// Display-only mapping from a source's logical root to its storage root.
///
/// Consumed as an opaque value: the registry passes it through to reporting
/// and never derives cache keys from it. `entry_root` is `None` when the
/// mapping is the identity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PathMapping {
    resource_root: String,
    entry_root: Option<String>,
}

impl PathMapping {
    /// Create a mapping from a logical root to an optional storage root.
    pub fn new(resource_root: impl Into<String>, entry_root: Option<String>) -> Self {
        Self {
            resource_root: resource_root.into(),
            entry_root,
        }
    }

    /// The logical root exposed to consumers of the source.
    pub fn resource_root(&self) -> &str {
        &self.resource_root
    }

    /// The internal storage root, absent when the mapping is the identity.
    pub fn entry_root(&self) -> Option<&str> {
        self.entry_root.as_deref()
    }
}

/// One managed source's monitoring record.
///
/// A handle carries the source's stable identity, a human-readable name,
/// a shared reference to the cache pair the source owns, and its path
/// mapping. Handle identity for registration purposes is the `Arc` pointer:
/// deregistration removes the same allocation that was registered, so two
/// sources with coincidentally equal fields never collide.
pub struct ProviderHandle {
    source_id: u64,
    display_name: String,
    caches: Arc<SourceCaches>,
    mapping: PathMapping,
}

impl ProviderHandle {
    /// Create a handle for a source exposing itself for monitoring.
    pub fn new(
        source_id: u64,
        display_name: impl Into<String>,
        caches: Arc<SourceCaches>,
        mapping: PathMapping,
    ) -> Self {
        Self {
            source_id,
            display_name: display_name.into(),
            caches,
            mapping,
        }
    }

    /// Stable identifier of the source.
    pub fn source_id(&self) -> u64 {
        self.source_id
    }

    /// Human-readable name of the source.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The cache pair this source owns.
    pub fn caches(&self) -> &SourceCaches {
        &self.caches
    }

    /// The source's path mapping, for display.
    pub fn mapping(&self) -> &PathMapping {
        &self.mapping
    }
}

/// Concurrency-safe collection of the currently registered handles.
///
/// Starts empty; expected (but not required) to be empty again before
/// process shutdown. All operations are in-memory and non-blocking apart
/// from brief lock hold times.
#[derive(Default)]
pub struct CacheRegistry {
    providers: RwLock<Vec<Arc<ProviderHandle>>>,
}

impl CacheRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle to the tracked set.
    ///
    /// Registering the same handle twice is a caller error but harmless: it
    /// produces a duplicate entry visible to reporting, never corruption.
    pub fn register(&self, handle: Arc<ProviderHandle>) {
        debug!(
            source_id = handle.source_id(),
            name = handle.display_name(),
            "provider registered"
        );
        self.write().push(handle);
        metrics::gauge!(telemetry::PROVIDERS_REGISTERED).increment(1.0);
    }

    /// Remove a handle from the tracked set.
    ///
    /// Matches by `Arc` identity and removes the first occurrence.
    /// Deregistering an absent handle is a no-op.
    pub fn deregister(&self, handle: &Arc<ProviderHandle>) {
        let removed = {
            let mut providers = self.write();
            match providers.iter().position(|p| Arc::ptr_eq(p, handle)) {
                Some(index) => {
                    providers.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            debug!(source_id = handle.source_id(), "provider deregistered");
            metrics::gauge!(telemetry::PROVIDERS_REGISTERED).decrement(1.0);
        }
    }

    /// Point-in-time copy of the registered handles, in registration order.
    ///
    /// The returned vector is safe to iterate with no further
    /// synchronization even while register/deregister proceed concurrently
    /// on other threads; it never observes a torn state and never fails.
    pub fn snapshot(&self) -> Vec<Arc<ProviderHandle>> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of currently registered handles.
    pub fn len(&self) -> usize {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<ProviderHandle>>> {
        // Reporting must keep working after a writer panic, so poisoning is
        // recovered rather than propagated.
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
