//! Occupancy reporting glue.
//!
//! Turns a registry snapshot into plain occupancy rows, one per registered
//! handle. Rendering (HTML, console, whatever) belongs to an external
//! front-end; the rows derive [`serde::Serialize`] so it can consume them
//! directly.
//!
//! [`collect`] always succeeds against any valid registry state: it reads a
//! point-in-time snapshot and then only touches in-memory accessors, so a
//! report is never partially rendered and then abandoned.

use serde::Serialize;

use crate::registry::{CacheRegistry, ProviderHandle};

/// Point-in-time occupancy of one bounded cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheUsage {
    /// Entries currently held.
    pub size: usize,
    /// Maximum entries retained.
    pub capacity: usize,
}

/// One report row: a source's identity, mapping, and cache occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderReport {
    /// Stable identifier of the source.
    pub source_id: u64,
    /// Human-readable name of the source.
    pub display_name: String,
    /// Logical root the source is mounted at.
    pub resource_root: String,
    /// Internal storage root, absent for identity mappings.
    pub entry_root: Option<String>,
    /// Occupancy of the resolved-entry cache.
    pub entry_cache: CacheUsage,
    /// Occupancy of the directory-listing cache.
    pub list_cache: CacheUsage,
}

impl ProviderReport {
    /// Read one handle's current state into a report row.
    pub fn from_handle(handle: &ProviderHandle) -> Self {
        Self {
            source_id: handle.source_id(),
            display_name: handle.display_name().to_owned(),
            resource_root: handle.mapping().resource_root().to_owned(),
            entry_root: handle.mapping().entry_root().map(str::to_owned),
            entry_cache: handle.caches().entry_usage(),
            list_cache: handle.caches().listing_usage(),
        }
    }
}

/// Report on every handle currently registered, in registration order.
///
/// The sizes are read per handle after the snapshot is taken, so rows
/// reflect each cache's state at read time — consistent enough for a
/// monitoring view, where staleness by a few updates is harmless.
pub fn collect(registry: &CacheRegistry) -> Vec<ProviderReport> {
    registry
        .snapshot()
        .iter()
        .map(|handle| ProviderReport::from_handle(handle))
        .collect()
}
