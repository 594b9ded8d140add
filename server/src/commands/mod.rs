//! Command Dispatch
//!
//! Routes a validated command interaction to its handler. Dispatch is
//! exact-name match; an unknown name resolves to "no follow-up", which is
//! distinct from an error message.

mod error;
mod roll;
mod spell;
mod sync;

use tracing::warn;

pub use error::CommandError;

use crate::api::AppState;
use crate::interactions::types::{CommandData, FollowUp, User};

/// Run the handler for a command interaction.
///
/// `Ok(None)` means no follow-up is sent and the placeholder stands.
pub async fn dispatch(
    state: &AppState,
    data: &CommandData,
    user: &User,
    token: &str,
) -> Result<Option<FollowUp>, CommandError> {
    match data.name.as_str() {
        "roll" | "r" => roll::handle(state, data, user).await,
        "sync" => sync::handle(state, data, user).await,
        "spell" => spell::handle(state, data, token).await,
        other => {
            warn!(command = %other, "Unknown command, no follow-up");
            Ok(None)
        }
    }
}
