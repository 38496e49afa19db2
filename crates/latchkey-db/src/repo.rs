//! Repository traits
//!
//! Async interface for the user lookup the session core depends on.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::models::UserRow;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user, including the stored password hash, by email.
    ///
    /// Returns `Ok(None)` when no account matches.
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;
}
