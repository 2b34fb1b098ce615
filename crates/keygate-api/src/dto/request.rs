//! Request DTOs.
//!
//! Credential fields are `Option<String>` so an absent form field reaches
//! the handler as `None` instead of a serde rejection; the authenticator
//! turns missing or empty fields into explicit validation errors.

use serde::{Deserialize, Serialize};

/// Registration form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Login form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}
