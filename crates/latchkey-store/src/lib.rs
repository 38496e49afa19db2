//! Latchkey Store - Session key-value store
//!
//! Short-lived key-value storage with per-key TTL that backs session and
//! remember tokens. Expiry is entirely the store's job; nothing in the
//! session core sweeps old entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use latchkey_store::{CacheStore, CacheStoreConfig, SessionStore};
//! use std::time::Duration;
//!
//! let store = CacheStore::new(CacheStoreConfig::default());
//! store.set("key", "value".to_string(), Duration::from_secs(60)).await?;
//! assert_eq!(store.get("key").await?.as_deref(), Some("value"));
//! ```

pub mod cache;
pub mod error;
pub mod store;

pub use cache::{CacheStore, CacheStoreConfig};
pub use error::{StoreError, StoreResult};
pub use store::SessionStore;
