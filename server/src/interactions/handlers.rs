//! Interaction Endpoint
//!
//! The single webhook entry point. The body is captured as raw bytes
//! exactly once and verified before any JSON parsing; pings are answered
//! inline; commands get a synchronous deferred ack while the handler runs
//! as a detached task whose result is delivered (or dropped) by the
//! follow-up boundary.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::{debug, instrument};

use super::error::InteractionError;
use super::followup;
use super::types::{
    CommandData, CommandType, Interaction, InteractionResponse, InteractionType, MessageFlags,
    User,
};
use crate::api::AppState;
use crate::commands;

/// Signature header.
const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Timestamp header.
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Placeholder shown until the follow-up lands.
const ACK_CONTENT: &str = "Working on it…";

/// POST / — verify, classify, ack.
#[instrument(skip_all)]
pub async fn post_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, (StatusCode, String)> {
    let signature = header_str(&headers, SIGNATURE_HEADER)
        .ok_or(InteractionError::MissingSignatureHeaders)?;
    let timestamp = header_str(&headers, TIMESTAMP_HEADER)
        .ok_or(InteractionError::MissingSignatureHeaders)?;

    if !state.verifier.verify(timestamp, &body, signature) {
        return Err(InteractionError::InvalidSignature.into());
    }

    // Parse only after the signature checks out; never act on
    // unauthenticated structure.
    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(|e| InteractionError::MalformedPayload(e.to_string()))?;

    match interaction.kind {
        InteractionType::Ping => {
            debug!("Ping acknowledged");
            Ok(Json(InteractionResponse::pong()))
        }
        InteractionType::ApplicationCommand => {
            let data = interaction
                .data
                .clone()
                .ok_or_else(|| InteractionError::MalformedPayload("missing command data".into()))?;
            if data.kind != CommandType::ChatInput {
                return Err(InteractionError::UnsupportedCommandType.into());
            }
            let user = interaction
                .invoker()
                .cloned()
                .ok_or(InteractionError::MissingInvoker)?;

            let flags = ack_flags(&data);
            spawn_command(state, data, user, interaction.token);

            Ok(Json(InteractionResponse::deferred(ACK_CONTENT, flags)))
        }
        InteractionType::MessageComponent => {
            Err(InteractionError::UnsupportedInteractionType.into())
        }
    }
}

/// Flags on the deferred placeholder.
///
/// Private when the invocation says so or the command is inherently
/// private; rich layout for commands whose final output carries
/// interactive components.
fn ack_flags(data: &CommandData) -> MessageFlags {
    let mut flags = MessageFlags::empty();
    if data.option_bool("private").unwrap_or(false) || data.name == "sync" {
        flags |= MessageFlags::EPHEMERAL;
    }
    if data.name == "spell" {
        flags |= MessageFlags::COMPONENTS_V2;
    }
    flags
}

/// Run the command detached from the HTTP response.
///
/// The spawned task owns its error boundary: whatever the handler does,
/// at most one follow-up is attempted for this token, and nothing
/// propagates back to the already-sent ack.
fn spawn_command(state: AppState, data: CommandData, user: User, token: String) {
    tokio::spawn(async move {
        let outcome = commands::dispatch(&state, &data, &user, &token).await;
        followup::deliver(&state, &token, outcome).await;
    });
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
