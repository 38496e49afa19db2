//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use latchkey_auth_core::AuthError;
use latchkey_types::UserSnapshot;

use crate::cookies::{read_cookie, ResponseCookies, AUTH_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Caller holding a live session cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Snapshot taken at login
    pub user: UserSnapshot,
    /// Raw `auth` cookie value
    pub session_token: String,
}

/// Auth rejection type
///
/// A stale `auth` cookie is cleared on the way out.
pub struct AuthRejection {
    error: ApiError,
    cookies: ResponseCookies,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.cookies, self.error).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let app_state = AppState::from_ref(state);
            let mut cookies = app_state.cookies();

            let Some(token) = read_cookie(&parts.headers, AUTH_COOKIE) else {
                return Err(AuthRejection {
                    error: ApiError::InvalidSession,
                    cookies,
                });
            };

            match app_state.sessions.get_session(token).await {
                Ok(user) => Ok(SessionUser {
                    user,
                    session_token: token.to_string(),
                }),
                Err(AuthError::InvalidSession) => {
                    tracing::debug!("Rejecting stale session cookie");
                    cookies.clear(AUTH_COOKIE);
                    Err(AuthRejection {
                        error: ApiError::InvalidSession,
                        cookies,
                    })
                }
                Err(e) => Err(AuthRejection {
                    error: ApiError::Auth(e),
                    cookies,
                }),
            }
        })
    }
}

/// Marker for routes only anonymous callers may use.
///
/// Any `auth` cookie, valid or not, rejects the request.
#[derive(Debug, Clone, Copy)]
pub struct Guest;

impl<S> FromRequestParts<S> for Guest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            match read_cookie(&parts.headers, AUTH_COOKIE) {
                Some(_) => Err(ApiError::GuestOnly),
                None => Ok(Guest),
            }
        })
    }
}
