//! Command Errors
//!
//! Failures inside command handlers, classified by what the user sees:
//! user-facing and upstream errors become follow-up text, internal errors
//! are logged at the follow-up boundary and the follow-up is omitted.

use thiserror::Error;

/// Errors from command handlers.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The invocation is missing a required option.
    #[error("missing required option '{0}'")]
    MissingOption(&'static str),
    /// An upstream service call failed (network or non-success status).
    #[error("upstream call failed: {0}")]
    Upstream(#[from] reqwest::Error),
    /// Local cache store failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CommandError {
    /// Text to deliver to the user, or `None` to omit the follow-up.
    ///
    /// Pure classification; the follow-up boundary does the logging.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::MissingOption(name) => Some(format!("Missing required option `{name}`.")),
            Self::Upstream(_) => {
                Some("Something went wrong talking to an upstream service. Try again later.".into())
            }
            Self::Database(_) => None,
        }
    }
}
