//! Process-wide monitor lifecycle.
//!
//! A hosting process gets at most one live [`CacheMonitor`], owning the
//! shared [`CacheRegistry`] that lifecycle management registers provider
//! handles into and reporting reads from. [`CacheMonitor::install`] is
//! idempotent and [`CacheMonitor::shutdown`] tolerates being called when
//! nothing is installed, so hosts can wire both into their own init and
//! teardown paths without guarding order or repetition.
//!
//! Shutdown only drops the process-wide reference. Holders of an `Arc`
//! obtained earlier keep the old monitor alive until they drop it; a later
//! `install` starts a fresh monitor with an empty registry.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::registry::CacheRegistry;

static INSTANCE: Mutex<Option<Arc<CacheMonitor>>> = Mutex::new(None);

/// The process-wide cache monitor.
pub struct CacheMonitor {
    registry: Arc<CacheRegistry>,
}

impl CacheMonitor {
    /// Install the process-wide monitor, or return the existing one.
    pub fn install() -> Arc<CacheMonitor> {
        let mut instance = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
        match instance.as_ref() {
            Some(monitor) => Arc::clone(monitor),
            None => {
                info!("cache monitor installed");
                let monitor = Arc::new(CacheMonitor {
                    registry: Arc::new(CacheRegistry::new()),
                });
                *instance = Some(Arc::clone(&monitor));
                monitor
            }
        }
    }

    /// The currently installed monitor, if any.
    pub fn current() -> Option<Arc<CacheMonitor>> {
        INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Tear down the process-wide monitor.
    ///
    /// Safe to call repeatedly and when nothing is installed.
    pub fn shutdown() {
        let previous = INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("cache monitor shut down");
        }
    }

    /// The registry this monitor owns.
    pub fn registry(&self) -> &Arc<CacheRegistry> {
        &self.registry
    }
}
