//! The user store capability.

use async_trait::async_trait;

use keygate_core::AppResult;

use super::model::{NewUser, User};

/// Capability for user persistence, injected into the authenticator.
///
/// Implementations must enforce username uniqueness **atomically at
/// insertion**: two concurrent [`insert`](UserStore::insert) calls with the
/// same username must yield exactly one success and one
/// [`Conflict`](keygate_core::error::ErrorKind::Conflict) error, never two
/// successes. Lookups are case-insensitive on username.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find a user by username, or `None` if no such user exists.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user, failing with a `Conflict` error if the username
    /// is already taken.
    async fn insert(&self, user: &NewUser) -> AppResult<User>;
}
