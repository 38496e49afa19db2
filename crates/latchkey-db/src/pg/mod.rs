//! PostgreSQL repository implementations

mod user;

pub use user::PgUserRepository;
