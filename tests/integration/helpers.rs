//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use keygate_api::state::AppState;
use keygate_auth::authenticator::SessionAuthenticator;
use keygate_auth::jwt::{JwtDecoder, JwtEncoder};
use keygate_auth::password::PasswordHasher;
use keygate_core::config::AppConfig;
use keygate_database::MemoryUserStore;

/// Test application context, backed by the in-memory user store.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Decoder sharing the test signing secret, for claim assertions.
    pub jwt_decoder: JwtDecoder,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = "memory".to_string();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let user_store = Arc::new(MemoryUserStore::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let authenticator = Arc::new(SessionAuthenticator::new(
            user_store,
            Arc::new(PasswordHasher::new()),
            jwt_encoder,
        ));

        let state = AppState {
            config: Arc::new(config.clone()),
            authenticator,
            jwt_decoder: Arc::clone(&jwt_decoder),
        };

        Self {
            router: keygate_api::build_router(state),
            jwt_decoder: JwtDecoder::new(&config.auth),
        }
    }

    /// Register a user and return the response.
    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/auth/registration",
            &[("username", username), ("password", password)],
            None,
        )
        .await
    }

    /// POST a form-encoded body, optionally with a Cookie header.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// POST with no body, optionally with a Cookie header.
    pub async fn post(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("POST").uri(path);

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
    /// Raw Set-Cookie headers, in response order.
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// The full Set-Cookie header for the named cookie, if present.
    pub fn set_cookie(&self, name: &str) -> Option<&str> {
        self.set_cookies
            .iter()
            .map(String::as_str)
            .find(|c| c.starts_with(&format!("{name}=")))
    }

    /// The value of the named cookie from the Set-Cookie headers.
    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        let header = self.set_cookie(name)?;
        let rest = &header[name.len() + 1..];
        Some(rest.split(';').next().unwrap_or(rest))
    }
}
