//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::interactions::handlers::post_interaction;
use crate::interactions::verify::SignatureVerifier;

/// Shared application state.
///
/// The pool and HTTP client are process-wide handles opened once at
/// startup and passed explicitly into handlers, keeping them
/// substitutable in tests.
#[derive(Clone)]
pub struct AppState {
    /// Sheet cache database pool
    pub db: SqlitePool,
    /// Outbound HTTP client
    pub http: reqwest::Client,
    /// Server configuration
    pub config: Arc<Config>,
    /// Parsed interaction-signature verifier
    pub verifier: Arc<SignatureVerifier>,
}

impl AppState {
    /// Create new application state, parsing the configured public key.
    pub fn new(db: SqlitePool, http: reqwest::Client, config: Config) -> Result<Self> {
        let verifier = SignatureVerifier::from_hex(&config.public_key)
            .context("PUBLIC_KEY is not a valid Ed25519 public key")?;

        Ok(Self {
            db,
            http,
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        })
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Interaction webhook
        .route("/", post(post_interaction))
        // Health check
        .route("/health", get(health_check))
        // The platform only ever POSTs the webhook; anything else is a
        // bad request, not a method negotiation.
        .method_not_allowed_fallback(bad_method)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Non-POST on the webhook path.
async fn bad_method() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "Bad request")
}
