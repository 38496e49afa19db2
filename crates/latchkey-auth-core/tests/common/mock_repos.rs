//! Mock repositories for testing

use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use latchkey_db::{DbError, DbResult, UserRepository, UserRow};
use latchkey_store::{SessionStore, StoreError, StoreResult};
use uuid::Uuid;

/// Argon2id hash with minimal cost so tests stay fast.
///
/// Verification reads the parameters back out of the PHC string, so these
/// hashes verify through the production code path.
pub fn cheap_hash(password: &str) -> String {
    let params = Params::new(8, 1, 1, None).unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

/// Create a test user with the given credentials
pub fn test_user(email: &str, password: &str) -> UserRow {
    UserRow {
        id: Uuid::new_v4(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password_hash: cheap_hash(password),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    by_email: Arc<DashMap<String, UserRow>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.clone(), user);
    }

    /// Replace a user's profile fields, as an admin edit would
    #[allow(dead_code)]
    pub fn rename(&self, email: &str, first_name: &str) {
        if let Some(mut user) = self.by_email.get_mut(email) {
            user.first_name = first_name.to_string();
            user.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self.by_email.get(email).map(|r| r.value().clone()))
    }
}

/// User repository whose every lookup fails
#[derive(Default, Clone)]
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_email(&self, _email: &str) -> DbResult<Option<UserRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// Store operation, for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Set,
    Get,
    Delete,
}

/// In-memory session store for testing.
///
/// Records the TTL of every write instead of expiring entries, and can be
/// told to fail a given operation for keys with a given prefix.
#[derive(Default, Clone)]
pub struct MockSessionStore {
    entries: Arc<DashMap<String, (String, Duration)>>,
    failures: Arc<DashMap<(StoreOp, String), ()>>,
}

#[allow(dead_code)]
impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `op` for every key starting with `key_prefix`
    pub fn fail_on(&self, op: StoreOp, key_prefix: &str) {
        self.failures.insert((op, key_prefix.to_string()), ());
    }

    /// Stop injecting failures
    pub fn heal(&self) {
        self.failures.clear();
    }

    /// Write a raw value, bypassing the session manager
    pub fn insert_raw(&self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .insert(key.to_string(), (value.to_string(), ttl));
    }

    /// Simulate TTL expiry of one key
    pub fn expire(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|e| e.value().1)
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|e| e.value().0.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self, op: StoreOp, key: &str) -> StoreResult<()> {
        let injected = self
            .failures
            .iter()
            .any(|f| f.key().0 == op && key.starts_with(f.key().1.as_str()));
        if injected {
            Err(StoreError::Unavailable(format!("injected {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> StoreResult<()> {
        self.check(StoreOp::Set, key)?;
        self.entries.insert(key.to_string(), (value, ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check(StoreOp::Get, key)?;
        Ok(self.entries.get(key).map(|e| e.value().0.clone()))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.check(StoreOp::Delete, key)?;
        self.entries.remove(key);
        Ok(())
    }
}

