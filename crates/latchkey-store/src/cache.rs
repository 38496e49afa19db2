//! In-process TTL cache store
//!
//! Backs [`SessionStore`] with a `moka` cache. Each entry carries its own
//! lifetime through an [`Expiry`] policy:
//! - a fresh insert lives for the TTL it was written with
//! - an overwrite restarts the clock with the new TTL
//! - reads never extend the lifetime
//!
//! The cache itself is unbounded, so nothing but expiry or an explicit
//! delete removes a live entry. `max_capacity` is an admission limit:
//! once reached, writes of new keys fail instead of displacing old ones.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;

use crate::error::{StoreError, StoreResult};
use crate::store::SessionStore;

/// Configuration for the cache store.
#[derive(Debug, Clone)]
pub struct CacheStoreConfig {
    /// Live entries after which new keys are refused.
    /// Default: 1,000,000
    pub max_capacity: u64,
}

impl Default for CacheStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000_000,
        }
    }
}

impl CacheStoreConfig {
    /// Set the admission limit.
    #[must_use]
    pub fn with_max_capacity(mut self, max: u64) -> Self {
        self.max_capacity = max;
        self
    }
}

/// Value plus the lifetime it was written with
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    ttl: Duration,
}

/// Per-entry expiry: the TTL travels with the value
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Session store backed by an in-process `moka` cache.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone)]
pub struct CacheStore {
    entries: Cache<String, StoredValue>,
    config: CacheStoreConfig,
}

impl CacheStore {
    /// Create a new cache store.
    pub fn new(config: CacheStoreConfig) -> Self {
        let entries = Cache::builder().expire_after(PerEntryTtl).build();

        Self { entries, config }
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Flush pending cache maintenance (expiry bookkeeping, counters).
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Whether a write of `key` would exceed the admission limit.
    ///
    /// `entry_count` lags behind writes, so the limit can be overshot by
    /// writes racing the bookkeeping; it is never enforced by eviction.
    async fn is_full(&self, key: &str) -> bool {
        if self.entries.entry_count() < self.config.max_capacity || self.entries.contains_key(key)
        {
            return false;
        }
        // Expired entries still count until maintenance runs
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() >= self.config.max_capacity
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(CacheStoreConfig::default())
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("config", &self.config)
            .field("entries", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for CacheStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> StoreResult<()> {
        if ttl.is_zero() {
            return Err(StoreError::InvalidTtl);
        }
        if self.is_full(key).await {
            return Err(StoreError::Backend("store full".to_string()));
        }
        self.entries
            .insert(key.to_string(), StoredValue { value, ttl })
            .await;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|stored| stored.value))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }
}
