//! Session management on top of a TTL store
//!
//! Every token maps to a JSON [`UserSnapshot`] in the store:
//! - session tokens live for `SessionConfig::session_ttl`, never extended
//! - remember tokens live for `SessionConfig::remember_ttl` and are replaced
//!   on every use (rotation)
//!
//! Expiry is left to the store. The manager holds no mutable state and is
//! safe to share across tasks.

use std::sync::Arc;

use latchkey_db::UserRepository;
use latchkey_store::SessionStore;
use latchkey_types::{RememberToken, RotatedSession, SessionPair, SessionToken, UserSnapshot};

use crate::config::SessionConfig;
use crate::crypto::verify_password;
use crate::token::{generate_remember_token, generate_session_token};
use crate::AuthError;

/// Session manager handles login, rotation, lookup and logout
pub struct SessionManager<U: ?Sized, S: ?Sized> {
    users: Arc<U>,
    store: Arc<S>,
    config: SessionConfig,
}

impl<U: ?Sized, S: ?Sized> Clone for SessionManager<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<U, S> SessionManager<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create a new session manager
    ///
    /// # Arguments
    /// * `users` - User lookup used for password login
    /// * `store` - TTL store holding token entries
    /// * `config` - Token lifetimes
    pub fn new(users: Arc<U>, store: Arc<S>, config: SessionConfig) -> Self {
        Self {
            users,
            store,
            config,
        }
    }

    /// Token lifetimes in use
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Log in with email and password.
    ///
    /// Issues a session token and, when `remember` is set, a remember token
    /// carrying the same snapshot. If the remember write fails the session
    /// already written stays valid.
    #[tracing::instrument(skip_all, fields(remember = remember))]
    pub async fn create_session_with_password(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<SessionPair, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.check_password(password, &user.password_hash).await? {
            tracing::debug!("Password mismatch");
            return Err(AuthError::InvalidPassword);
        }

        let value = encode_snapshot(&user.snapshot())?;

        let session_token = generate_session_token();
        self.store
            .set(session_token.as_str(), value.clone(), self.config.session_ttl)
            .await?;

        let remember_token = if remember {
            let token = generate_remember_token();
            self.store
                .set(token.as_str(), value, self.config.remember_ttl)
                .await?;
            Some(token)
        } else {
            None
        };

        tracing::debug!(user_id = %user.id, "Session issued");

        Ok(SessionPair {
            session_token,
            remember_token,
        })
    }

    /// Trade a remember token for a new session and a new remember token.
    ///
    /// Order: write the new remember entry, delete the old one, then write
    /// the session. A failure after the delete leaves the caller with neither
    /// the old token nor a session. Two concurrent rotations of one token
    /// can both succeed.
    ///
    /// Any failure to fetch or decode the old entry is `InvalidSession`, so
    /// the caller drops the token instead of retrying it until it expires.
    #[tracing::instrument(skip_all)]
    pub async fn create_session_with_remember_token(
        &self,
        remember_token: &str,
    ) -> Result<RotatedSession, AuthError> {
        let old_token = RememberToken::parse(remember_token).ok_or(AuthError::InvalidSession)?;
        let snapshot = self
            .load_snapshot(old_token.as_str())
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Remember token unusable");
                AuthError::InvalidSession
            })?;
        let value = encode_snapshot(&snapshot)?;

        let new_remember_token = generate_remember_token();
        self.store
            .set(
                new_remember_token.as_str(),
                value.clone(),
                self.config.remember_ttl,
            )
            .await?;

        self.store.delete(old_token.as_str()).await?;

        let session_token = generate_session_token();
        self.store
            .set(session_token.as_str(), value, self.config.session_ttl)
            .await?;

        tracing::debug!(user_id = %snapshot.id, "Remember token rotated");

        Ok(RotatedSession {
            session_token,
            remember_token: new_remember_token,
        })
    }

    /// Resolve a session token to the snapshot stored at login.
    ///
    /// Reads do not extend the session.
    #[tracing::instrument(skip_all)]
    pub async fn get_session(&self, session_token: &str) -> Result<UserSnapshot, AuthError> {
        let token = SessionToken::parse(session_token).ok_or(AuthError::InvalidSession)?;
        self.load_snapshot(token.as_str()).await
    }

    /// Log out.
    ///
    /// The remember token goes first and its failure aborts before the
    /// session is touched. Absent or malformed tokens are skipped.
    #[tracing::instrument(skip_all, fields(with_remember = remember_token.is_some()))]
    pub async fn delete_session(
        &self,
        session_token: &str,
        remember_token: Option<&str>,
    ) -> Result<(), AuthError> {
        if let Some(raw) = remember_token {
            match RememberToken::parse(raw) {
                Some(token) => self.store.delete(token.as_str()).await?,
                None => tracing::debug!("Ignoring malformed remember token"),
            }
        }

        match SessionToken::parse(session_token) {
            Some(token) => self.store.delete(token.as_str()).await?,
            None => tracing::debug!("Ignoring malformed session token"),
        }

        Ok(())
    }

    async fn load_snapshot(&self, key: &str) -> Result<UserSnapshot, AuthError> {
        let raw = self
            .store
            .get(key)
            .await?
            .ok_or(AuthError::InvalidSession)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Run the expensive hash comparison on the blocking pool
    async fn check_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?
            .map_err(|_| AuthError::MalformedPasswordHash)
    }
}

impl<U: ?Sized, S: ?Sized> std::fmt::Debug for SessionManager<U, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn encode_snapshot(snapshot: &UserSnapshot) -> Result<String, AuthError> {
    Ok(serde_json::to_string(snapshot)?)
}
