//! Auth errors

use latchkey_store::StoreError;
use thiserror::Error;

/// Session lifecycle errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No account matches the email
    #[error("user not found")]
    UserNotFound,

    /// Password does not match the stored hash
    #[error("invalid password")]
    InvalidPassword,

    /// Token is absent, expired, malformed or of the wrong kind
    #[error("invalid session")]
    InvalidSession,

    /// Session store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Stored snapshot could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// User lookup failure
    #[error("database error: {0}")]
    Database(String),

    /// Stored password hash is not a valid PHC string
    #[error("malformed password hash")]
    MalformedPasswordHash,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPassword | Self::InvalidSession => 401,
            Self::UserNotFound => 404,
            Self::Store(_)
            | Self::Serialization(_)
            | Self::Database(_)
            | Self::MalformedPasswordHash
            | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Store(_) => "STORE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::MalformedPasswordHash => "MALFORMED_PASSWORD_HASH",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller sent bad credentials, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<latchkey_db::DbError> for AuthError {
    fn from(err: latchkey_db::DbError) -> Self {
        Self::Database(err.to_string())
    }
}
