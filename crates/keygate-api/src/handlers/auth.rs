//! Auth handlers — registration, login, refresh, logout.
//!
//! Token pairs never appear in response bodies; they are delivered through
//! the two-cookie scheme in [`crate::cookies`].

use axum::Json;
use axum::extract::{Form, State};
use axum_extra::extract::cookie::CookieJar;

use crate::cookies::{clear_token_cookies, set_token_cookies};
use crate::error::ApiError;
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::extractors::{AuthUser, RefreshGrant};
use crate::state::AppState;

/// POST /auth/registration
pub async fn registration(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<RegisterRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    let outcome = state
        .authenticator
        .register(
            req.username.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    let jar = set_token_cookies(jar, &outcome.tokens);

    Ok((
        jar,
        Json(ApiResponse::ok(AuthResponse {
            message: "User created".to_string(),
            user: UserResponse::from(&outcome.user),
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    let outcome = state
        .authenticator
        .login(
            req.username.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    let jar = set_token_cookies(jar, &outcome.tokens);

    Ok((
        jar,
        Json(ApiResponse::ok(AuthResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(&outcome.user),
        })),
    ))
}

/// POST /auth/refresh
///
/// The `RefreshGrant` gate has already verified the refresh cookie; both
/// tokens are rotated and the prior cookies overwritten.
pub async fn refresh(
    State(state): State<AppState>,
    grant: RefreshGrant,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let tokens = state.authenticator.refresh(&grant.0)?;

    let jar = set_token_cookies(jar, &tokens);

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Token refreshed".to_string(),
        })),
    ))
}

/// POST /auth/logout
///
/// Advisory logout: both cookies are cleared so the client stops sending
/// credentials. The tokens themselves stay valid until natural expiry.
pub async fn logout(
    _auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let jar = clear_token_cookies(jar);

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out successfully".to_string(),
        })),
    ))
}
