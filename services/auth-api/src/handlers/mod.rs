//! HTTP handlers

mod auth;
mod health;

pub use auth::{create_session_with_password, create_session_with_remember_token, delete_session, me};
pub use health::{health, ready};
