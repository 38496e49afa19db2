//! Session lifetime policy

use std::time::Duration;

/// Lifetime of a session token: 1 hour
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Lifetime of a remember token: 7 days
pub const REMEMBER_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Session manager configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a session token stays valid after issuance
    pub session_ttl: Duration,
    /// How long a remember token stays valid after issuance or rotation
    pub remember_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_ttl: SESSION_TTL,
            remember_ttl: REMEMBER_TTL,
        }
    }
}

impl SessionConfig {
    /// Set session token lifetime
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Set remember token lifetime
    pub fn with_remember_ttl(mut self, ttl: Duration) -> Self {
        self.remember_ttl = ttl;
        self
    }
}
