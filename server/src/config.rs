//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// `SQLite` connection URL for the sheet cache
    pub database_url: String,

    /// Hex-encoded Ed25519 public key used to verify inbound interactions
    pub public_key: String,

    /// Application id on the chat platform (used in follow-up URLs)
    pub application_id: String,

    /// Bot token for authenticated follow-up delivery
    pub bot_token: String,

    /// Base URL of the chat platform API (default: official endpoint)
    pub api_base_url: String,

    /// Base URL of the external character-sheet service
    pub sheet_service_url: String,

    /// URL of the external spell-lookup GraphQL endpoint
    pub spell_service_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://dicewarden.db?mode=rwc".into()),
            public_key: env::var("PUBLIC_KEY").context("PUBLIC_KEY must be set")?,
            application_id: env::var("APPLICATION_ID").context("APPLICATION_ID must be set")?,
            bot_token: env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://discord.com/api/v10".into()),
            sheet_service_url: env::var("SHEET_SERVICE_URL")
                .context("SHEET_SERVICE_URL must be set")?,
            spell_service_url: env::var("SPELL_SERVICE_URL")
                .context("SPELL_SERVICE_URL must be set")?,
        })
    }

    /// Create a default configuration for testing.
    ///
    /// Upstream URLs point at localhost ports that tests override with
    /// throwaway servers; `public_key` is filled in per-test from a
    /// generated keypair.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            database_url: "sqlite::memory:".into(),
            public_key: String::new(),
            application_id: "1096181136760504321".into(),
            bot_token: "test-token".into(),
            api_base_url: "http://127.0.0.1:1".into(),
            sheet_service_url: "http://127.0.0.1:1".into(),
            spell_service_url: "http://127.0.0.1:1".into(),
        }
    }
}
