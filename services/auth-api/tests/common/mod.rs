//! Common test utilities for latchkey-auth-api integration tests

use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use dashmap::DashMap;
use http_body_util::BodyExt;
use latchkey_auth_api::{router, AppState, Config};
use latchkey_db::{DbResult, UserRepository, UserRow};
use latchkey_store::{CacheStore, SessionStore, StoreError, StoreResult};
use tower::ServiceExt;
use uuid::Uuid;

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct-horse";

/// In-memory user repository keyed by email
#[derive(Default, Clone)]
pub struct MockUserRepository {
    by_email: Arc<DashMap<String, UserRow>>,
}

impl MockUserRepository {
    pub fn with_user(email: &str, password: &str) -> Self {
        let repo = Self::default();
        // Minimal Argon2id cost; parameters travel in the PHC string
        let params = Params::new(8, 1, 1, None).unwrap();
        let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
            .unwrap()
            .to_string();
        repo.by_email.insert(
            email.to_string(),
            UserRow {
                id: Uuid::new_v4(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: email.to_string(),
                password_hash: hash,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self.by_email.get(email).map(|r| r.value().clone()))
    }
}

/// Session store that is always down
#[derive(Default, Clone)]
pub struct UnavailableStore;

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

pub fn test_config() -> Config {
    Config {
        http_port: 0,
        database_url: String::new(),
        database_max_connections: 1,
        store_max_capacity: 1_000,
        cookie_secure: false,
    }
}

/// Router over mock users and a real in-process store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<CacheStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(CacheStore::default());
        let state = AppState::new(
            Arc::new(MockUserRepository::with_user(EMAIL, PASSWORD)),
            store.clone(),
            test_config(),
        );
        Self {
            router: router(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in and return the `auth` and `remember` cookie values
    pub async fn login(&self, remember: bool) -> (String, Option<String>) {
        let response = self
            .send(login_request(EMAIL, PASSWORD, remember, None))
            .await;
        assert_eq!(response.status(), 204);
        let auth = set_cookie(&response, "auth").expect("auth cookie");
        let remember = set_cookie(&response, "remember");
        (auth, remember)
    }
}

pub fn login_request(
    email: &str,
    password: &str,
    remember: bool,
    cookie: Option<&str>,
) -> Request<Body> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "remember": remember,
    });
    let mut builder = Request::builder()
        .method("POST")
        .uri("/sessions/password")
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// All `Set-Cookie` lines of a response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of the last non-empty `Set-Cookie` for `name`
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .iter()
        .filter_map(|line| line.strip_prefix(&prefix))
        .filter_map(|rest| rest.split(';').next())
        .filter(|value| !value.is_empty())
        .last()
        .map(String::from)
}

/// Whether the response clears `name`
pub fn clears_cookie(response: &Response<Body>, name: &str) -> bool {
    let prefix = format!("{name}=;");
    set_cookies(response)
        .iter()
        .any(|line| line.starts_with(&prefix) && line.contains("Max-Age=0"))
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
