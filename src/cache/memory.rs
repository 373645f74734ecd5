//! In-memory [`PlayerCache`] backed by moka.

use std::time::Duration;

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::{CacheConfig, PlayerCache};
use crate::error::CacheError;
use crate::types::{NormalizedPlayerData, PlayerId};

/// A stored record with its freshness clock.
///
/// Entries are immutable once inserted; a refresh replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: NormalizedPlayerData,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(value: NormalizedPlayerData, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    /// Fresh while strictly younger than its TTL.
    pub fn is_fresh(&self) -> bool {
        self.inserted_at.elapsed() < self.ttl
    }

    /// Time left before the entry expires.
    pub fn remaining_ttl(&self) -> Duration {
        self.ttl.saturating_sub(self.inserted_at.elapsed())
    }
}

/// Per-entry expiry: every insert or overwrite lives for the entry's own TTL.
struct EntryExpiry;

impl Expiry<PlayerId, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &PlayerId,
        value: &CacheEntry,
        _created_at: std::time::Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &PlayerId,
        value: &CacheEntry,
        _updated_at: std::time::Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory player cache.
///
/// Expiry is enforced twice: moka drops rows natively, and [`get`] checks
/// the entry's own clock so a row moka has not yet evicted is still a miss.
///
/// [`get`]: PlayerCache::get
pub struct MemoryPlayerCache {
    entries: Cache<PlayerId, CacheEntry>,
    sweeper: Option<JoinHandle<()>>,
}

impl MemoryPlayerCache {
    /// Create a cache without a background sweeper.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(EntryExpiry)
            .build();
        Self {
            entries,
            sweeper: None,
        }
    }

    /// Create a cache and start its background sweeper.
    ///
    /// Must be called inside a tokio runtime. A zero `sweep_interval`
    /// skips the sweeper.
    pub fn with_sweeper(config: &CacheConfig) -> Self {
        let mut cache = Self::new(config);
        if config.sweep_interval > Duration::ZERO {
            cache.start_sweeper(config.sweep_interval);
        }
        cache
    }

    fn start_sweeper(&mut self, every: Duration) {
        let entries = self.entries.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                entries.run_pending_tasks().await;
                debug!(entries = entries.entry_count(), "cache sweep complete");
            }
        });
        self.sweeper = Some(handle);
    }

    /// Run moka's pending maintenance, evicting expired entries.
    ///
    /// moka tracks expiry on a timer wheel with roughly one-second
    /// granularity, so an entry that expired less than about a second ago
    /// may survive this call and go on a later sweep. `get` never returns
    /// such an entry.
    pub async fn sweep(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Whether a background sweeper is running.
    pub fn sweeper_running(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the background sweeper. Idempotent.
    pub fn stop_sweeper(&self) {
        if let Some(handle) = &self.sweeper {
            handle.abort();
        }
    }

    /// Approximate number of stored entries, expired ones included until
    /// the next sweep.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Stored entry for `key`, fresh or not.
    pub async fn entry(&self, key: &PlayerId) -> Option<CacheEntry> {
        self.entries.get(key).await
    }
}

impl Drop for MemoryPlayerCache {
    fn drop(&mut self) {
        self.stop_sweeper();
    }
}

#[async_trait]
impl PlayerCache for MemoryPlayerCache {
    async fn get(&self, key: &PlayerId) -> Result<Option<NormalizedPlayerData>, CacheError> {
        Ok(self
            .entries
            .get(key)
            .await
            .filter(CacheEntry::is_fresh)
            .map(|entry| entry.value))
    }

    async fn set(
        &self,
        key: &PlayerId,
        value: NormalizedPlayerData,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.entries
            .insert(key.clone(), CacheEntry::new(value, ttl))
            .await;
        Ok(())
    }
}
