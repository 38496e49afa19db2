//! Latchkey Auth API
//!
//! Cookie-based session endpoints over `latchkey-auth-core`:
//!
//! | Route                     | Access  |
//! |---------------------------|---------|
//! | `POST /sessions/password` | guest   |
//! | `POST /sessions/refresh`  | anyone  |
//! | `DELETE /sessions`        | session |
//! | `GET /me`                 | session |
//! | `GET /health`, `/ready`   | anyone  |

pub mod config;
pub mod cookies;
pub mod csrf;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;

pub use config::{Config, ConfigError};
pub use state::AppState;

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route(
            "/sessions/password",
            post(handlers::create_session_with_password),
        )
        .route(
            "/sessions/refresh",
            post(handlers::create_session_with_remember_token),
        )
        .route("/sessions", delete(handlers::delete_session))
        .route("/me", get(handlers::me))
        .with_state(state)
}
