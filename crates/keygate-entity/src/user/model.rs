//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered identity in the Keygate system.
///
/// Identities are created at registration and immutable thereafter; there
/// are no update or delete operations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name (case-insensitive).
    pub username: String,
    /// Argon2 password hash. Never serialized, never logged.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
///
/// The password arrives here already hashed; cleartext never crosses the
/// store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique identifier generated at registration time.
    pub id: Uuid,
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

impl NewUser {
    /// Build a new user record with a freshly generated v4 id.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
