//! Store trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreResult;

/// Key-value store with per-key time-to-live.
///
/// Implementations must be safe for concurrent use; callers hold no locks
/// around these calls and rely on per-key atomicity only.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous entry and its TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> StoreResult<()>;

    /// Fetch the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or has expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}
