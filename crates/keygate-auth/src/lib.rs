//! # keygate-auth
//!
//! Credential and token logic for Keygate.
//!
//! ## Modules
//!
//! - `jwt` — JWT token pair creation and validation
//! - `password` — Argon2id password hashing and verification
//! - `authenticator` — the session authenticator: registration, login,
//!   token rotation

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::SessionAuthenticator;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
