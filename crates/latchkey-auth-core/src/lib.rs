//! Latchkey Auth Core - Session lifecycle business logic
//!
//! Password login, remember-token rotation, session lookup and logout on top
//! of a TTL key-value store. Transport concerns (cookies, CSRF, status codes)
//! live in the service that calls into this crate.

pub mod config;
pub mod crypto;
pub mod error;
pub mod session;
pub mod token;

pub use config::*;
pub use crypto::{hash_password, verify_password, PasswordHashError};
pub use error::*;
pub use session::*;
pub use token::*;
