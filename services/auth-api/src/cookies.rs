//! Cookie reading and `Set-Cookie` emission
//!
//! Every cookie this service writes is `HttpOnly; SameSite=Lax; Path=/`,
//! plus `Secure` unless disabled in config. Clearing a cookie writes it
//! empty with `Max-Age=0`.

use std::convert::Infallible;
use std::time::Duration;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

use crate::error::{ApiError, ApiResult};

/// Session token cookie
pub const AUTH_COOKIE: &str = "auth";

/// Remember token cookie
pub const REMEMBER_COOKIE: &str = "remember";

/// CSRF token cookie
pub const CSRF_COOKIE: &str = "csrf";

/// Find a cookie value in the request headers.
///
/// Empty values count as absent.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` headers queued for a response
#[derive(Debug, Default)]
pub struct ResponseCookies {
    secure: bool,
    values: Vec<HeaderValue>,
}

impl ResponseCookies {
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            values: Vec::new(),
        }
    }

    /// Queue a cookie living for `max_age`
    pub fn set(&mut self, name: &str, value: &str, max_age: Duration) -> ApiResult<()> {
        let cookie = self.format(name, value, max_age.as_secs());
        let header = HeaderValue::from_str(&cookie)
            .map_err(|_| ApiError::Internal(format!("unencodable value for cookie {name}")))?;
        self.values.push(header);
        Ok(())
    }

    /// Queue removal of a cookie
    pub fn clear(&mut self, name: &'static str) {
        let cookie = self.format(name, "", 0);
        // Name and attributes are fixed ASCII
        if let Ok(header) = HeaderValue::from_str(&cookie) {
            self.values.push(header);
        }
    }

    fn format(&self, name: &str, value: &str, max_age: u64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!("{name}={value}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax{secure}")
    }
}

impl IntoResponseParts for ResponseCookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for value in self.values {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}
