//! Latchkey DB - User lookup
//!
//! SQLx-based access to the user table. The session core only ever needs one
//! query from it: find a user (with password hash) by email.
//!
//! # Example
//!
//! ```rust,ignore
//! use latchkey_db::{create_pool, PgUserRepository, UserRepository};
//!
//! let pool = create_pool("postgres://localhost/latchkey").await?;
//! let users = PgUserRepository::new(pool);
//!
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::PgUserRepository;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
