//! Common test utilities for latchkey-auth-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{
    cheap_hash, test_user, FailingUserRepository, MockSessionStore, MockUserRepository, StoreOp,
};
