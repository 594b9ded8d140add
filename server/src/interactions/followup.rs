//! Follow-Up Delivery
//!
//! The error boundary for the detached command continuation. After the
//! handler resolves, exactly one authenticated PATCH is attempted against
//! the per-token follow-up endpoint; user-facing failures are converted
//! to text here, internal failures are logged and the follow-up is
//! silently omitted. No retries.

use tracing::{debug, error, warn};

use super::types::FollowUp;
use crate::api::AppState;
use crate::commands::CommandError;

/// Deliver a dispatched handler's outcome for an interaction token.
pub async fn deliver(state: &AppState, token: &str, outcome: Result<Option<FollowUp>, CommandError>) {
    let payload = match outcome {
        Ok(Some(payload)) => payload,
        // Unknown command: no follow-up, the placeholder stands.
        Ok(None) => return,
        Err(err) => match err.user_message() {
            Some(text) => {
                warn!(error = %err, "Command failed, delivering failure text");
                FollowUp::text(text)
            }
            None => {
                error!(error = %err, "Command handler failed, omitting follow-up");
                return;
            }
        },
    };

    if let Err(err) = publish(state, token, &payload).await {
        error!(error = %err, "Failed to deliver follow-up");
    }
}

/// PATCH the final payload to the platform's follow-up endpoint.
async fn publish(state: &AppState, token: &str, payload: &FollowUp) -> reqwest::Result<()> {
    let url = format!(
        "{}/webhooks/{}/{}/messages/@original",
        state.config.api_base_url, state.config.application_id, token
    );

    state
        .http
        .patch(&url)
        .bearer_auth(&state.config.bot_token)
        .json(payload)
        .send()
        .await?
        .error_for_status()?;

    debug!("Follow-up delivered");
    Ok(())
}
