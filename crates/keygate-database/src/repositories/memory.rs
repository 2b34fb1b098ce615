//! In-process user store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use keygate_core::AppResult;
use keygate_core::error::AppError;
use keygate_entity::user::{NewUser, User, UserStore};

/// In-memory [`UserStore`] implementation.
///
/// Backs the `backend = "memory"` configuration and the integration tests.
/// The duplicate check and the insert happen under a single write guard, so
/// concurrent registrations of the same username see exactly one success.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// Users keyed by lowercase username.
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&username.to_lowercase()).cloned())
    }

    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let key = user.username.to_lowercase();

        if users.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let record = User {
            id: user.id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(key, record.clone());
        Ok(record)
    }
}
