//! CSRF token invalidation
//!
//! CSRF tokens are issued and checked elsewhere; this service only drops
//! the current one whenever the session identity changes. The token named
//! by the `csrf` cookie lives in the shared store under `csrf:<token>`.

use axum::http::HeaderMap;
use latchkey_store::{SessionStore, StoreResult};

use crate::cookies::{read_cookie, ResponseCookies, CSRF_COOKIE};

/// Store key prefix for CSRF tokens
pub const CSRF_KEY_PREFIX: &str = "csrf:";

/// Store key for a CSRF token
pub fn csrf_key(token: &str) -> String {
    format!("{CSRF_KEY_PREFIX}{token}")
}

/// Delete the request's CSRF token, if any, and queue clearing its cookie
pub async fn invalidate_csrf(
    store: &dyn SessionStore,
    headers: &HeaderMap,
    cookies: &mut ResponseCookies,
) -> StoreResult<()> {
    let Some(token) = read_cookie(headers, CSRF_COOKIE) else {
        return Ok(());
    };

    store.delete(&csrf_key(token)).await?;
    cookies.clear(CSRF_COOKIE);
    Ok(())
}
