//! Token-verification gates.
//!
//! `AuthUser` and `RefreshGrant` are `FromRequestParts` extractors that run
//! before the handler body: they pull the token cookie, validate it, and
//! either yield an authenticated context or reject the request with an
//! authorization error. Handlers behind them never see an invalid token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use keygate_auth::jwt::Claims;
use keygate_core::error::AppError;

use crate::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Identity extracted from a valid access token cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Username recorded at token issuance.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::authorization("Missing access token cookie"))?;

        let claims = state.jwt_decoder.decode_access_token(&token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

/// Verified refresh claims extracted from the refresh token cookie.
///
/// Possession of this value is the precondition of the rotation operation:
/// signature, expiry, and token type have already been checked.
#[derive(Debug, Clone)]
pub struct RefreshGrant(pub Claims);

impl FromRequestParts<AppState> for RefreshGrant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::authorization("Missing refresh token cookie"))?;

        let claims = state.jwt_decoder.decode_refresh_token(&token)?;

        Ok(RefreshGrant(claims))
    }
}
