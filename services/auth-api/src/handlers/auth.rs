//! Session handlers (login, refresh, logout, me)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use latchkey_auth_core::AuthError;
use latchkey_types::UserSnapshot;
use serde::Deserialize;
use validator::Validate;

use crate::cookies::{read_cookie, ResponseCookies, AUTH_COOKIE, REMEMBER_COOKIE};
use crate::csrf::invalidate_csrf;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Guest, SessionUser};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionWithPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/password
///
/// Log in with email and password
pub async fn create_session_with_password(
    State(state): State<AppState>,
    _guest: Guest,
    headers: HeaderMap,
    body: Result<Json<CreateSessionWithPasswordRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected login body");
        ApiError::InvalidRequest
    })?;
    req.validate()?;

    let pair = state
        .sessions
        .create_session_with_password(&req.email, &req.password, req.remember)
        .await?;

    let mut cookies = state.cookies();
    invalidate_csrf(state.store.as_ref(), &headers, &mut cookies)
        .await
        .map_err(AuthError::from)?;

    let ttl = state.session_config();
    cookies.set(AUTH_COOKIE, pair.session_token.as_str(), ttl.session_ttl)?;
    if let Some(remember) = &pair.remember_token {
        cookies.set(REMEMBER_COOKIE, remember.as_str(), ttl.remember_ttl)?;
    }

    Ok((StatusCode::NO_CONTENT, cookies, ()))
}

/// POST /sessions/refresh
///
/// Trade the remember cookie for a new session and remember token
pub async fn create_session_with_remember_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let Some(remember_token) = read_cookie(&headers, REMEMBER_COOKIE) else {
        return Err(ApiError::InvalidRememberToken);
    };

    let rotated = match state
        .sessions
        .create_session_with_remember_token(remember_token)
        .await
    {
        Ok(rotated) => rotated,
        Err(AuthError::InvalidSession) => {
            let mut cookies = state.cookies();
            cookies.clear(REMEMBER_COOKIE);
            return Ok((cookies, ApiError::InvalidSession).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let mut cookies = state.cookies();
    invalidate_csrf(state.store.as_ref(), &headers, &mut cookies)
        .await
        .map_err(AuthError::from)?;

    let ttl = state.session_config();
    cookies.set(AUTH_COOKIE, rotated.session_token.as_str(), ttl.session_ttl)?;
    cookies.set(
        REMEMBER_COOKIE,
        rotated.remember_token.as_str(),
        ttl.remember_ttl,
    )?;

    Ok((StatusCode::NO_CONTENT, cookies, ()).into_response())
}

/// DELETE /sessions
///
/// Log out, dropping the session and its paired remember token
pub async fn delete_session(
    State(state): State<AppState>,
    session: SessionUser,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let remember_token = read_cookie(&headers, REMEMBER_COOKIE);

    state
        .sessions
        .delete_session(&session.session_token, remember_token)
        .await?;

    let mut cookies: ResponseCookies = state.cookies();
    invalidate_csrf(state.store.as_ref(), &headers, &mut cookies)
        .await
        .map_err(AuthError::from)?;

    cookies.clear(AUTH_COOKIE);
    cookies.clear(REMEMBER_COOKIE);

    tracing::info!(user_id = %session.user.id, "Session deleted");

    Ok((StatusCode::NO_CONTENT, cookies, ()))
}

/// GET /me
///
/// Snapshot of the logged-in user
pub async fn me(session: SessionUser) -> Json<UserSnapshot> {
    Json(session.user)
}
