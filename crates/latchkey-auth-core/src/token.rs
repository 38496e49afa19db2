//! Opaque token generation
//!
//! A token is two independent random identifiers, a UUID v4 and a ULID,
//! under a kind prefix. A weakness in either generator alone does not make
//! tokens guessable.

use latchkey_types::{RememberToken, SessionToken};
use ulid::Ulid;
use uuid::Uuid;

/// Generate a fresh session token (`@app-<uuid>:<ulid>`).
///
/// # Panics
/// Panics if the OS randomness source is unavailable.
pub fn generate_session_token() -> SessionToken {
    SessionToken::from_parts(Uuid::new_v4(), Ulid::new())
}

/// Generate a fresh remember token (`@app-remember-<uuid>:<ulid>`).
///
/// # Panics
/// Panics if the OS randomness source is unavailable.
pub fn generate_remember_token() -> RememberToken {
    RememberToken::from_parts(Uuid::new_v4(), Ulid::new())
}
