//! Latchkey Auth API
//!
//! Session login/refresh/logout service.

use std::net::SocketAddr;
use std::sync::Arc;

use latchkey_auth_api::{router, AppState, Config};
use latchkey_db::{create_pool_with_options, PgUserRepository, PoolOptions};
use latchkey_store::{CacheStore, CacheStoreConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Latchkey Auth API");

    let config = Config::from_env()?;

    let pool = create_pool_with_options(
        &config.database_url,
        PoolOptions {
            max_connections: config.database_max_connections,
            ..PoolOptions::default()
        },
    )
    .await?;

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let store = Arc::new(CacheStore::new(
        CacheStoreConfig::default().with_max_capacity(config.store_max_capacity),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(users, store, config).with_pool(pool);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
