//! Player record cache.
//!
//! [`PlayerCache`] is the contract the request handler relies on: `get`
//! returns a value only while it is younger than its TTL, `set` inserts or
//! replaces an entry and restarts its clock. Both return `Result` so that
//! back-ends which can fail (remote stores) report it; the handler treats
//! any failure as a miss and carries on.
//!
//! [`MemoryPlayerCache`] is the only back-end: moka's in-memory cache with
//! native per-entry expiry. Its optional sweeper exists to flush expired
//! rows while the process is idle, not for correctness.

mod memory;

pub use memory::{CacheEntry, MemoryPlayerCache};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::types::{NormalizedPlayerData, PlayerId};

/// How long a player record is served from cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Interval of the background sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Key-value store of normalized player records with TTL semantics.
#[async_trait]
pub trait PlayerCache: Send + Sync {
    /// Fresh value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &PlayerId) -> Result<Option<NormalizedPlayerData>, CacheError>;

    /// Insert or overwrite `key`, fresh for `ttl` from now.
    async fn set(
        &self,
        key: &PlayerId,
        value: NormalizedPlayerData,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

/// Configuration for the player cache.
///
/// ```rust
/// # use paimon::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(120));
/// assert_eq!(config.sweep_interval, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached players. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached players. Default: 5 minutes.
    pub ttl: Duration,
    /// Background sweep interval; zero disables the sweeper. Default: 60s.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the sweep interval.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}
