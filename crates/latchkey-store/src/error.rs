//! Store errors

use thiserror::Error;

/// Session store errors
///
/// A missing key is not an error: `get` reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with a failure
    #[error("store backend error: {0}")]
    Backend(String),

    /// Entries must have a non-zero lifetime
    #[error("ttl must be greater than zero")]
    InvalidTtl,
}

/// Result alias for store calls
pub type StoreResult<T> = Result<T, StoreError>;
