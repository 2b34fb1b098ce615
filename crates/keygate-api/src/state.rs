//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use keygate_auth::authenticator::SessionAuthenticator;
use keygate_auth::jwt::JwtDecoder;
use keygate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Credential/token lifecycle orchestrator.
    pub authenticator: Arc<SessionAuthenticator>,
    /// JWT token decoder and validator, used by the extractor gates.
    pub jwt_decoder: Arc<JwtDecoder>,
}
