//! # keygate-api
//!
//! HTTP API layer for Keygate built on Axum.
//!
//! Provides the auth endpoints, cookie construction, token-verification
//! extractors, middleware (CORS, logging), DTOs, and error mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
