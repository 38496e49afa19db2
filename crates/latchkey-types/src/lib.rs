//! Latchkey Types - Shared domain types
//!
//! This crate contains domain types used across Latchkey crates:
//! - User identity and the cached user snapshot
//! - Session and remember token formats

pub mod session;
pub mod user;

pub use session::*;
pub use user::*;
