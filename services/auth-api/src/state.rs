//! Application state

use std::ops::Deref;
use std::sync::Arc;

use latchkey_auth_core::{SessionConfig, SessionManager};
use latchkey_db::{DbPool, UserRepository};
use latchkey_store::SessionStore;

use crate::config::Config;

/// Session manager over trait-object backends
pub type DynSessionManager = SessionManager<dyn UserRepository, dyn SessionStore>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle
    pub sessions: Arc<DynSessionManager>,
    /// Store shared with the session manager, used for CSRF invalidation
    pub store: Arc<dyn SessionStore>,
    /// Database pool for readiness probes; absent when users come from elsewhere
    pub pool: Option<SharedPool>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        users: Arc<dyn UserRepository>,
        store: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        let sessions = SessionManager::new(users, Arc::clone(&store), SessionConfig::default());
        Self {
            sessions: Arc::new(sessions),
            store,
            pool: None,
            config: Arc::new(config),
        }
    }

    /// Attach the database pool probed by `/ready`
    pub fn with_pool(mut self, pool: DbPool) -> Self {
        self.pool = Some(SharedPool(Arc::new(pool)));
        self
    }

    /// Token lifetimes, also used as cookie `Max-Age`
    pub fn session_config(&self) -> &SessionConfig {
        self.sessions.config()
    }

    /// Fresh cookie set honouring the `Secure` setting
    pub fn cookies(&self) -> crate::cookies::ResponseCookies {
        crate::cookies::ResponseCookies::new(self.config.cookie_secure)
    }
}
