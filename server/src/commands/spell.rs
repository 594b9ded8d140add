//! Spell Command
//!
//! One combined search against the spell service. Resolution priority:
//! exact-id hit, then fuzzy-hit count — zero is "not found", one
//! auto-renders, several become disambiguation button rows whose
//! correlation ids tie a press back to this interaction.

use crate::api::AppState;
use crate::interactions::types::{
    ActionRow, Button, CommandData, Embed, EmbedImage, FollowUp,
};
use crate::spells::{client, Spell};

use super::CommandError;

/// Characters of the interaction token carried in correlation ids.
const TOKEN_PREFIX_LEN: usize = 8;

/// Platform limit on buttons per action row.
const ROW_CAPACITY: usize = 5;

/// Handle `/spell name:<search term>`.
pub async fn handle(
    state: &AppState,
    data: &CommandData,
    token: &str,
) -> Result<Option<FollowUp>, CommandError> {
    let term = data
        .option_str("name")
        .ok_or(CommandError::MissingOption("name"))?;

    let results = client::search(&state.http, &state.config.spell_service_url, term).await?;

    if let Some(spell) = results.spell {
        return Ok(Some(spell_card(&spell)));
    }

    let followup = match results.spells.as_slice() {
        [] => FollowUp::text(format!("No spell found matching `{term}`.")),
        [only] => spell_card(only),
        candidates => disambiguation(token, term, candidates),
    };
    Ok(Some(followup))
}

/// Image-embed card for a resolved spell.
fn spell_card(spell: &Spell) -> FollowUp {
    FollowUp::embed(Embed {
        title: Some(spell.name.clone()),
        image: spell
            .image
            .clone()
            .map(|url| EmbedImage { url }),
    })
}

/// One button per candidate, tagged with a correlation id built from a
/// short prefix of the interaction token plus the candidate's id.
/// Candidates past the per-row button limit wrap onto further rows.
fn disambiguation(token: &str, term: &str, candidates: &[Spell]) -> FollowUp {
    let prefix: String = token.chars().take(TOKEN_PREFIX_LEN).collect();
    let rows = candidates
        .chunks(ROW_CAPACITY)
        .map(|chunk| {
            ActionRow::buttons(
                chunk
                    .iter()
                    .map(|spell| {
                        Button::secondary(
                            spell.name.clone(),
                            format!("spell:{prefix}:{}", spell.id),
                        )
                    })
                    .collect(),
            )
        })
        .collect();

    FollowUp {
        content: Some(format!("Multiple spells match `{term}`:")),
        embeds: None,
        components: Some(rows),
    }
}
