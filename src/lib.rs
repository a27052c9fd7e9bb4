//! Huginn - bounded caches with a live occupancy registry
//!
//! This crate maintains a small fleet of bounded, in-memory caches — one
//! [`SourceCaches`] pair per managed content source — and a concurrent
//! [`CacheRegistry`] that tracks which caches currently exist while sources
//! are added and removed at runtime. A reporting side can take a consistent
//! [`CacheRegistry::snapshot`] at any moment, concurrently with arbitrary
//! registration churn, and read every source's cache occupancy from it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use huginn::{CacheConfig, CacheRegistry, PathMapping, ProviderHandle, SourceCaches, report};
//!
//! fn main() -> huginn::Result<()> {
//!     let caches = Arc::new(SourceCaches::new(&CacheConfig::new().entry_capacity(100))?);
//!
//!     // The source resolves content and fills its own caches.
//!     caches.store_entry("/content/logo.png", "store:/7/logo.png");
//!
//!     // Lifecycle management registers the source for monitoring.
//!     let registry = CacheRegistry::new();
//!     let handle = Arc::new(ProviderHandle::new(
//!         7,
//!         "example-source",
//!         Arc::clone(&caches),
//!         PathMapping::new("/content", None),
//!     ));
//!     registry.register(Arc::clone(&handle));
//!
//!     // Reporting reads occupancy from a point-in-time snapshot.
//!     let rows = report::collect(&registry);
//!     assert_eq!(rows[0].entry_cache.size, 1);
//!
//!     registry.deregister(&handle);
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency model
//!
//! The registry is safe for structural mutation from arbitrary threads
//! concurrently with full-collection reads. A single [`BoundedCache`] is
//! not internally synchronized — [`SourceCaches`] provides the owner-side
//! serialization for the per-source pair.

pub mod cache;
pub mod error;
pub mod monitor;
pub mod registry;
pub mod report;
pub mod telemetry;

// Re-export main types at crate root
pub use cache::{BoundedCache, CacheConfig, SourceCaches};
pub use error::{HuginnError, Result};
pub use monitor::CacheMonitor;
pub use registry::{CacheRegistry, PathMapping, ProviderHandle};
pub use report::{CacheUsage, ProviderReport};
