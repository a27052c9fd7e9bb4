//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `cache` — which cache of a source pair: "entry" or "list"

/// Total cache hits.
///
/// Labels: `cache` ("entry" | "list").
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total cache misses.
///
/// Labels: `cache` ("entry" | "list").
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Number of provider handles currently registered.
pub const PROVIDERS_REGISTERED: &str = "huginn_providers_registered";
