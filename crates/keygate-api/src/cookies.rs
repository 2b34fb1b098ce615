//! The two-cookie token transport.
//!
//! The access cookie is scoped to the whole application; the refresh cookie
//! only ever travels to the refresh endpoint. Both are Secure and HttpOnly,
//! so scripts cannot read them.

use axum_extra::extract::cookie::{Cookie, CookieJar};

use keygate_auth::jwt::TokenPair;

/// Cookie carrying the access token on every request.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token_cookie";
/// Cookie carrying the refresh token, scoped to the refresh endpoint.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token_cookie";

/// Path scope of the access cookie.
pub const ACCESS_TOKEN_PATH: &str = "/";
/// Path scope of the refresh cookie; must match the refresh route.
pub const REFRESH_TOKEN_PATH: &str = "/auth/refresh";

/// Adds both token cookies to the jar, overwriting any prior pair.
pub fn set_token_cookies(jar: CookieJar, tokens: &TokenPair) -> CookieJar {
    jar.add(access_cookie(tokens.access_token.clone()))
        .add(refresh_cookie(tokens.refresh_token.clone()))
}

/// Removes both token cookies (expired, empty-value removal cookies).
pub fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path(ACCESS_TOKEN_PATH))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path(REFRESH_TOKEN_PATH))
}

fn access_cookie(value: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path(ACCESS_TOKEN_PATH)
        .secure(true)
        .http_only(true)
        .build()
}

fn refresh_cookie(value: String) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, value))
        .path(REFRESH_TOKEN_PATH)
        .secure(true)
        .http_only(true)
        .build()
}
