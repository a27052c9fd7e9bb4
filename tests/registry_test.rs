//! Tests for [`CacheRegistry`] — registration lifecycle and snapshot
//! consistency under concurrent churn.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use huginn::{CacheRegistry, PathMapping, ProviderHandle, SourceCaches};

fn handle(source_id: u64, name: &str) -> Arc<ProviderHandle> {
    Arc::new(ProviderHandle::new(
        source_id,
        name,
        Arc::new(SourceCaches::with_defaults()),
        PathMapping::new(format!("/content/{name}"), None),
    ))
}

#[test]
fn register_snapshot_deregister_roundtrip() {
    let registry = CacheRegistry::new();
    let h1 = handle(7, "bundle-7");

    registry.register(Arc::clone(&h1));
    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(Arc::ptr_eq(&snapshot[0], &h1));
    assert_eq!(snapshot[0].source_id(), 7);
    assert_eq!(snapshot[0].display_name(), "bundle-7");

    registry.deregister(&h1);
    assert!(registry.snapshot().is_empty());

    // Second deregister is a no-op.
    registry.deregister(&h1);
    assert!(registry.snapshot().is_empty());
}

#[test]
fn re_registration_starts_a_fresh_lifecycle() {
    let registry = CacheRegistry::new();
    let h1 = handle(7, "bundle-7");

    registry.register(Arc::clone(&h1));
    registry.deregister(&h1);
    registry.register(Arc::clone(&h1));

    assert_eq!(registry.len(), 1);
    registry.deregister(&h1);
    assert!(registry.is_empty());
}

#[test]
fn handle_exposes_its_caches_and_mapping() {
    let caches = Arc::new(SourceCaches::with_defaults());
    caches.store_entry("/content/a", "store:/a");

    let h = Arc::new(ProviderHandle::new(
        42,
        "mapped-source",
        Arc::clone(&caches),
        PathMapping::new("/content", Some("/internal/content".into())),
    ));

    let registry = CacheRegistry::new();
    registry.register(Arc::clone(&h));

    let snapshot = registry.snapshot();
    let seen = &snapshot[0];
    assert_eq!(seen.caches().entry_usage().size, 1);
    assert_eq!(seen.mapping().resource_root(), "/content");
    assert_eq!(seen.mapping().entry_root(), Some("/internal/content"));
}

/// Writers register and deregister their own handles in a tight loop while
/// a reader snapshots continuously. Every observed snapshot must be free of
/// duplicates and contain only handles that were actually registered.
#[test]
fn snapshots_stay_consistent_under_register_deregister_churn() {
    const WRITERS: usize = 4;

    let registry = Arc::new(CacheRegistry::new());
    let stop = Arc::new(AtomicBool::new(false));

    // One distinct handle per writer, known up front so the reader can
    // check that snapshots never contain a foreign handle.
    let handles: Vec<Arc<ProviderHandle>> = (0..WRITERS as u64)
        .map(|i| handle(i, &format!("writer-{i}")))
        .collect();
    let known: HashSet<u64> = handles.iter().map(|h| h.source_id()).collect();

    let mut workers = Vec::new();
    for h in &handles {
        let registry = Arc::clone(&registry);
        let stop = Arc::clone(&stop);
        let h = Arc::clone(h);
        workers.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                registry.register(Arc::clone(&h));
                registry.deregister(&h);
            }
        }));
    }

    let reader = {
        let registry = Arc::clone(&registry);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut observed = 0usize;
            while !stop.load(Ordering::Relaxed) {
                let snapshot = registry.snapshot();
                let mut seen = HashSet::new();
                for h in &snapshot {
                    assert!(
                        seen.insert(Arc::as_ptr(h)),
                        "snapshot contained a duplicate handle"
                    );
                    assert!(
                        known.contains(&h.source_id()),
                        "snapshot contained a handle that was never registered"
                    );
                }
                observed += 1;
            }
            observed
        })
    };

    thread::sleep(Duration::from_millis(200));
    stop.store(true, Ordering::Relaxed);

    for worker in workers {
        worker.join().expect("writer thread panicked");
    }
    let observed = reader.join().expect("reader thread panicked");
    assert!(observed > 0, "reader should have taken snapshots");

    // Each writer deregistered last, so the registry drains back to empty.
    assert!(registry.is_empty());
}
