//! Sync Command
//!
//! Overwrites the user's cache slot with a freshly fetched sheet. With an
//! explicit id the slot is replaced outright; without one the cached id
//! is refreshed in place. Nothing cached and nothing given fails without
//! any upstream call.

use tracing::{info, warn};

use crate::api::AppState;
use crate::interactions::types::{CommandData, FollowUp, User};
use crate::sheets::cache::{self, CacheError};
use crate::sheets::queries;

use super::CommandError;

/// Shown whenever a sync cannot complete; the cache is left untouched.
const SYNC_FAILED: &str =
    "Could not sync that sheet. Make sure your sheet still exists and is set to public.";

/// Handle `/sync [id:<sheet id>]`.
pub async fn handle(
    state: &AppState,
    data: &CommandData,
    user: &User,
) -> Result<Option<FollowUp>, CommandError> {
    let sheet_id = match data.option_str("id") {
        Some(id) => id.to_string(),
        None => match queries::load(&state.db, &user.id).await? {
            Some(stored) => stored.sheet_id,
            None => return Ok(Some(FollowUp::text(SYNC_FAILED))),
        },
    };

    match cache::put(
        &state.db,
        &state.http,
        &state.config.sheet_service_url,
        &user.id,
        &sheet_id,
    )
    .await
    {
        Ok(sheet) => {
            info!(user_id = %user.id, sheet_id = %sheet.id, "Sheet synced");
            Ok(Some(FollowUp::text(format!("Synced **{}**.", sheet.name))))
        }
        Err(CacheError::Database(err)) => Err(err.into()),
        Err(err) => {
            warn!(user_id = %user.id, sheet_id = %sheet_id, error = %err, "Sync failed");
            Ok(Some(FollowUp::text(SYNC_FAILED)))
        }
    }
}
