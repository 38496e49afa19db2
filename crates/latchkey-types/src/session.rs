//! Session and remember token types
//!
//! Both token kinds share the wire shape `<prefix><uuid>:<ulid>`:
//! - session tokens use the `@app-` prefix
//! - remember tokens use the `@app-remember-` prefix
//!
//! The prefix tells the kind apart without a store lookup. Nothing about the
//! user is encoded in a token; the store entry behind it is the only link.

use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

/// Prefix of short-lived session tokens
pub const SESSION_TOKEN_PREFIX: &str = "@app-";

/// Prefix of long-lived remember tokens
pub const REMEMBER_TOKEN_PREFIX: &str = "@app-remember-";

/// Separator between the UUID and the ULID components
pub const TOKEN_SEPARATOR: char = ':';

/// Length of a hyphenated UUID
const UUID_LEN: usize = 36;

/// Kind of an opaque token, derived from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived session token
    Session,
    /// Long-lived, rotating remember token
    Remember,
}

impl TokenKind {
    /// Namespace prefix for this kind
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Session => SESSION_TOKEN_PREFIX,
            Self::Remember => REMEMBER_TOKEN_PREFIX,
        }
    }

    /// Classify a token string.
    ///
    /// Returns `None` unless the string is exactly a known prefix followed by
    /// `<uuid>:<ulid>`. The remember prefix is tried first since it extends
    /// the session prefix.
    pub fn classify(token: &str) -> Option<Self> {
        if let Some(rest) = token.strip_prefix(REMEMBER_TOKEN_PREFIX) {
            return has_token_body(rest).then_some(Self::Remember);
        }
        if let Some(rest) = token.strip_prefix(SESSION_TOKEN_PREFIX) {
            return has_token_body(rest).then_some(Self::Session);
        }
        None
    }

    /// Build a token string of this kind from its two random components
    pub fn compose(self, primary: Uuid, secondary: Ulid) -> String {
        format!(
            "{}{}{}{}",
            self.prefix(),
            primary.hyphenated(),
            TOKEN_SEPARATOR,
            secondary
        )
    }
}

fn has_token_body(body: &str) -> bool {
    let Some((primary, secondary)) = body.split_once(TOKEN_SEPARATOR) else {
        return false;
    };
    primary.len() == UUID_LEN
        && Uuid::parse_str(primary).is_ok()
        && Ulid::from_string(secondary).is_ok()
}

/// Short-lived session token (`@app-<uuid>:<ulid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Build a session token from its random components
    pub fn from_parts(primary: Uuid, secondary: Ulid) -> Self {
        Self(TokenKind::Session.compose(primary, secondary))
    }

    /// Parse a session token, rejecting other kinds and malformed strings
    pub fn parse(s: &str) -> Option<Self> {
        (TokenKind::classify(s) == Some(TokenKind::Session)).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Long-lived remember token (`@app-remember-<uuid>:<ulid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RememberToken(String);

impl RememberToken {
    /// Build a remember token from its random components
    pub fn from_parts(primary: Uuid, secondary: Ulid) -> Self {
        Self(TokenKind::Remember.compose(primary, secondary))
    }

    /// Parse a remember token, rejecting other kinds and malformed strings
    pub fn parse(s: &str) -> Option<Self> {
        (TokenKind::classify(s) == Some(TokenKind::Remember)).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RememberToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tokens issued together for one login or one rotation.
///
/// When both are present they reference the same user snapshot and must be
/// deleted together on logout; dropping only the session leaves the remember
/// token valid until its own TTL runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPair {
    pub session_token: SessionToken,
    pub remember_token: Option<RememberToken>,
}

/// Tokens issued by a remember-token rotation. Both are always fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatedSession {
    pub session_token: SessionToken,
    pub remember_token: RememberToken,
}
