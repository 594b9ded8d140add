//! Roll Command
//!
//! Evaluates a dice expression with the user's cached sheet stats exposed
//! as named variables. Engine failures are converted to a diagnostic
//! follow-up; they never propagate as protocol errors.

use std::collections::HashMap;

use crate::api::AppState;
use crate::dice::{self, render};
use crate::interactions::types::{CommandData, FollowUp, User};
use crate::sheets::cache;

use super::CommandError;

/// Handle `/roll dice:<expression>` (and its `/r` alias).
pub async fn handle(
    state: &AppState,
    data: &CommandData,
    user: &User,
) -> Result<Option<FollowUp>, CommandError> {
    let input = data
        .option_str("dice")
        .ok_or(CommandError::MissingOption("dice"))?;

    // Absent sheet means no variables; the engine reports any reference
    // to one as an unknown variable.
    let vars = cache::get(
        &state.db,
        &state.http,
        &state.config.sheet_service_url,
        &user.id,
    )
    .await?
    .map_or_else(HashMap::new, |sheet| sheet.stats);

    let message = match dice::roll(input, &vars) {
        Ok(result) => format!(
            "**{}** rolled `{}`\n{} = **{}**",
            user.username,
            result.normalized,
            render::render(&result.calculation),
            result.result_text(),
        ),
        Err(err) => format!("Could not roll `{input}`: {err}."),
    };

    Ok(Some(FollowUp::text(message)))
}
