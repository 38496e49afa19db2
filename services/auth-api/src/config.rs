//! Configuration for the Auth API service.

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Database pool size
    pub database_max_connections: u32,

    /// Live store entries after which new logins are refused
    /// (sessions, remember tokens, CSRF)
    pub store_max_capacity: u64,

    /// Emit the `Secure` attribute on cookies
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?;

        // Server
        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Store
        let store_max_capacity = lookup("STORE_MAX_CAPACITY")
            .unwrap_or_else(|| "1000000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("STORE_MAX_CAPACITY"))?;

        let cookie_secure = lookup("COOKIE_SECURE")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("COOKIE_SECURE"))?;

        Ok(Self {
            http_port,
            database_url,
            database_max_connections,
            store_max_capacity,
            cookie_secure,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
