//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

#[tokio::test]
async fn test_registration_success_sets_both_cookies() {
    let app = helpers::TestApp::new();

    let response = app.register("alice", "password123").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["user"]["username"], "alice");

    let access = response.set_cookie("access_token_cookie").unwrap();
    assert!(access.contains("Path=/"));
    assert!(access.contains("Secure"));
    assert!(access.contains("HttpOnly"));

    let refresh = response.set_cookie("refresh_token_cookie").unwrap();
    assert!(refresh.contains("Path=/auth/refresh"));
    assert!(refresh.contains("Secure"));
    assert!(refresh.contains("HttpOnly"));
}

#[tokio::test]
async fn test_registration_missing_fields() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form("/auth/registration", &[("password", "password123")], None)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "username required");

    let response = app
        .post_form("/auth/registration", &[("username", "alice")], None)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "password required");
}

#[tokio::test]
async fn test_registration_duplicate_username() {
    let app = helpers::TestApp::new();

    assert_eq!(app.register("alice", "password123").await.status, StatusCode::OK);

    let response = app.register("alice", "different").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_tokens_bound_to_registered_user() {
    let app = helpers::TestApp::new();

    let response = app.register("alice", "password123").await;
    let user_id: Uuid = response.body["data"]["user"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let access = response.cookie_value("access_token_cookie").unwrap();
    let refresh = response.cookie_value("refresh_token_cookie").unwrap();

    let access_claims = app.jwt_decoder.decode_access_token(access).unwrap();
    let refresh_claims = app.jwt_decoder.decode_refresh_token(refresh).unwrap();
    assert_eq!(access_claims.sub, user_id);
    assert_eq!(refresh_claims.sub, user_id);
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.register("alice", "password123").await;

    let response = app
        .post_form(
            "/auth/login",
            &[("username", "alice"), ("password", "password123")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie("access_token_cookie").is_some());
    assert!(response.set_cookie("refresh_token_cookie").is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new();
    app.register("alice", "password123").await;

    let response = app
        .post_form(
            "/auth/login",
            &[("username", "alice"), ("password", "wrong")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION_ERROR");
    assert_eq!(response.body["message"], "wrong password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form(
            "/auth/login",
            &[("username", "nobody"), ("password", "password123")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "user not found");
}

#[tokio::test]
async fn test_refresh_rotates_both_tokens() {
    let app = helpers::TestApp::new();

    let registered = app.register("alice", "password123").await;
    let old_access = registered.cookie_value("access_token_cookie").unwrap().to_string();
    let old_refresh = registered.cookie_value("refresh_token_cookie").unwrap().to_string();

    let response = app
        .post(
            "/auth/refresh",
            Some(&format!("refresh_token_cookie={old_refresh}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let new_access = response.cookie_value("access_token_cookie").unwrap();
    let new_refresh = response.cookie_value("refresh_token_cookie").unwrap();
    assert_ne!(new_access, old_access);
    assert_ne!(new_refresh, old_refresh);

    // Rotation keeps the identity binding.
    let old_claims = app.jwt_decoder.decode_refresh_token(&old_refresh).unwrap();
    let new_claims = app.jwt_decoder.decode_refresh_token(new_refresh).unwrap();
    assert_eq!(old_claims.sub, new_claims.sub);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = helpers::TestApp::new();

    let registered = app.register("alice", "password123").await;
    let access = registered.cookie_value("access_token_cookie").unwrap();

    let response = app
        .post(
            "/auth/refresh",
            Some(&format!("refresh_token_cookie={access}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHORIZATION_ERROR");
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = helpers::TestApp::new();

    let response = app.post("/auth/refresh", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHORIZATION_ERROR");
}

#[tokio::test]
async fn test_logout_clears_both_cookies() {
    let app = helpers::TestApp::new();

    let registered = app.register("alice", "password123").await;
    let access = registered.cookie_value("access_token_cookie").unwrap();

    let response = app
        .post("/auth/logout", Some(&format!("access_token_cookie={access}")))
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let cleared_access = response.set_cookie("access_token_cookie").unwrap();
    assert!(cleared_access.starts_with("access_token_cookie=;"));
    assert!(cleared_access.contains("Max-Age=0"));

    let cleared_refresh = response.set_cookie("refresh_token_cookie").unwrap();
    assert!(cleared_refresh.starts_with("refresh_token_cookie=;"));
    assert!(cleared_refresh.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_requires_valid_access_token() {
    let app = helpers::TestApp::new();

    let response = app.post("/auth/logout", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/auth/logout", Some("access_token_cookie=garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
