//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending signed requests through the
//! full axum router, an in-memory database pool, and throwaway upstream
//! servers on ephemeral ports for the sheet and spell services.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use ed25519_dalek::{Signer, SigningKey};
use http_body_util::BodyExt;
use rand::rngs::OsRng;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use dw_server::api::{create_router, AppState};
use dw_server::config::Config;
use dw_server::db;

/// A fully wired application with a per-test signing keypair.
pub struct TestApp {
    pub state: AppState,
    signing: SigningKey,
}

impl TestApp {
    /// App with the default test config (upstream URLs unroutable).
    pub async fn new() -> Self {
        Self::with_config(Config::default_for_test()).await
    }

    /// App with a caller-tweaked config; the public key is always
    /// replaced with this test's generated keypair.
    pub async fn with_config(mut config: Config) -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        config.public_key = hex::encode(signing.verifying_key().to_bytes());

        let pool = memory_pool().await;
        let http = reqwest::Client::new();
        let state = AppState::new(pool, http, config).expect("test state");

        Self { state, signing }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Sign a body over `timestamp ‖ body` and POST it to the webhook.
    pub async fn post_signed(&self, payload: &serde_json::Value) -> Response {
        let body = payload.to_string();
        let timestamp = "1700000000";

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body.as_bytes());
        let signature = hex::encode(self.signing.sign(&message).to_bytes());

        self.post_raw(&body, Some((&signature, timestamp))).await
    }

    /// POST with explicit (possibly absent or wrong) signature headers.
    pub async fn post_raw(&self, body: &str, headers: Option<(&str, &str)>) -> Response {
        let mut builder = Request::builder()
            .method(http::Method::POST)
            .uri("/")
            .header(http::header::CONTENT_TYPE, "application/json");
        if let Some((signature, timestamp)) = headers {
            builder = builder
                .header("x-signature-ed25519", signature)
                .header("x-signature-timestamp", timestamp);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        self.router().oneshot(request).await.unwrap()
    }
}

/// In-memory pool with a single connection so every query sees the same
/// database, migrated and ready.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::run_migrations(&pool).await.expect("migrations");
    pool
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Spawn a throwaway upstream server on an ephemeral port.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
