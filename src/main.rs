//! Keygate Server — credential-based authentication endpoint.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use keygate_auth::authenticator::SessionAuthenticator;
use keygate_auth::jwt::{JwtDecoder, JwtEncoder};
use keygate_auth::password::PasswordHasher;
use keygate_core::config::AppConfig;
use keygate_core::error::AppError;
use keygate_entity::user::UserStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("KEYGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Keygate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: User store (backend dispatch) ────────────────────
    let user_store = build_user_store(&config).await?;

    // ── Step 2: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let authenticator = Arc::new(SessionAuthenticator::new(
        Arc::clone(&user_store),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
    ));

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app_state = keygate_api::AppState {
        config: Arc::new(config.clone()),
        authenticator,
        jwt_decoder,
    };

    let app = keygate_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Keygate server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Keygate server shut down gracefully");
    Ok(())
}

/// Construct the configured user store backend.
async fn build_user_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, AppError> {
    match config.database.backend.as_str() {
        "memory" => {
            tracing::info!("Using in-memory user store");
            Ok(Arc::new(keygate_database::MemoryUserStore::new()))
        }
        "postgres" => {
            tracing::info!("Connecting to PostgreSQL user store...");
            let pool = keygate_database::DatabasePool::connect(&config.database).await?;
            keygate_database::migration::run_migrations(pool.pool()).await?;
            Ok(Arc::new(keygate_database::UserRepository::new(
                pool.into_pool(),
            )))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database backend: '{other}'. Expected 'postgres' or 'memory'"
        ))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
