//! The session authenticator — registration, login, and token rotation.

use std::sync::Arc;

use tracing::{info, warn};

use keygate_core::error::AppError;
use keygate_entity::user::{NewUser, User, UserStore};

use crate::jwt::encoder::TokenPair;
use crate::jwt::{Claims, JwtEncoder};
use crate::password::PasswordHasher;

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Orchestrates the credential/token lifecycle.
///
/// Stateless across requests: every operation is a function of its inputs
/// plus the injected [`UserStore`]. Tokens are never persisted; a session
/// exists only as the pair held by the client.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    /// User persistence capability.
    user_store: Arc<dyn UserStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
}

impl SessionAuthenticator {
    /// Creates a new authenticator with its injected dependencies.
    pub fn new(
        user_store: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_store,
            password_hasher,
            jwt_encoder,
        }
    }

    /// Registers a new identity and issues its first token pair.
    ///
    /// 1. Validate both fields are present and non-empty
    /// 2. Reject usernames that already exist
    /// 3. Hash the password (Argon2id, fresh salt)
    /// 4. Insert the user; a concurrent duplicate loses at the store's
    ///    unique constraint and surfaces the same conflict error
    /// 5. Issue a fresh token pair bound to the new id
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthOutcome, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("username required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password required"));
        }

        if self.user_store.find_by_username(username).await?.is_some() {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = self
            .user_store
            .insert(&NewUser::new(username, password_hash))
            .await?;

        let tokens = self.jwt_encoder.issue_pair(user.id, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthOutcome { tokens, user })
    }

    /// Authenticates an existing identity and issues a fresh token pair.
    ///
    /// The lookup result is matched explicitly: an absent user and a wrong
    /// password are distinct, tested branches.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthOutcome, AppError> {
        let user = match self.user_store.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username = %username, "Login rejected: user not found");
                return Err(AppError::authentication("user not found"));
            }
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::authentication("wrong password"));
        }

        let tokens = self.jwt_encoder.issue_pair(user.id, &user.username)?;

        info!(user_id = %user.id, "Login successful");

        Ok(AuthOutcome { tokens, user })
    }

    /// Rotates a token pair for an already-verified refresh credential.
    ///
    /// The caller (the refresh gate) has validated the refresh token; this
    /// is purely a re-issuance of both tokens bound to the same identity.
    /// No persistence is touched.
    pub fn refresh(&self, claims: &Claims) -> Result<TokenPair, AppError> {
        let tokens = self.jwt_encoder.issue_pair(claims.sub, &claims.username)?;

        info!(user_id = %claims.sub, "Token pair rotated");

        Ok(tokens)
    }
}
