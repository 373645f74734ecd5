//! Telemetry metric name constants.
//!
//! Centralised metric names for paimon operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `paimon_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: "ok", "not_found" or "error"
//! - `source`: where bootstrap assets came from: "disk" or "remote"

/// Player lookups answered from the cache.
pub const CACHE_HITS_TOTAL: &str = "paimon_cache_hits_total";

/// Player lookups that missed the cache (absent or expired).
pub const CACHE_MISSES_TOTAL: &str = "paimon_cache_misses_total";

/// Cache back-end failures that were degraded to a miss or skipped write.
///
/// Labels: `operation` ("get" | "set").
pub const CACHE_ERRORS_TOTAL: &str = "paimon_cache_errors_total";

/// Calls made to the upstream player API.
///
/// Labels: `status` ("ok" | "not_found" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "paimon_upstream_requests_total";

/// Upstream player API latency in seconds.
pub const UPSTREAM_DURATION_SECONDS: &str = "paimon_upstream_duration_seconds";

/// Successful asset bootstraps.
///
/// Labels: `source` ("disk" | "remote").
pub const ASSET_BOOTSTRAPS_TOTAL: &str = "paimon_asset_bootstraps_total";
