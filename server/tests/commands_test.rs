//! Command-handler tests against throwaway upstream sheet and spell
//! services: the sync→roll round trip, sync failure modes, and the spell
//! resolution policy.

mod helpers;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use dw_server::api::AppState;
use dw_server::commands;
use dw_server::config::Config;
use dw_server::interactions::types::{CommandData, FollowUp, User};
use dw_server::sheets::{queries, Sheet};

use helpers::{spawn_upstream, TestApp};

/// Sheet service fixture: "42" is public with strength 4, "13" is
/// private, everything else is a 404.
fn sheet_service() -> Router {
    Router::new().route(
        "/{id}",
        get(|Path(id): Path<String>| async move {
            match id.as_str() {
                "42" => Json(json!({
                    "id": "42",
                    "ownerId": "owner-1",
                    "public": true,
                    "name": "Mordenkainen",
                    "stats": {"strength": 4.0, "dexterity": 2.0}
                }))
                .into_response(),
                "13" => Json(json!({
                    "id": "13",
                    "ownerId": "owner-2",
                    "public": false,
                    "name": "Hidden",
                    "stats": {}
                }))
                .into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }),
    )
}

/// Spell service fixture keyed on the search term.
fn spell_service() -> Router {
    Router::new().route(
        "/",
        post(|Json(body): Json<serde_json::Value>| async move {
            let term = body["variables"]["query"].as_str().unwrap_or_default();
            let data = match term {
                "fire" => json!({
                    "spell": null,
                    "spells": [
                        {"id": "spell-1", "name": "Fireball", "image": "https://img.test/fireball.png"},
                        {"id": "spell-2", "name": "Fire Bolt", "image": null},
                        {"id": "spell-3", "name": "Fire Shield", "image": null}
                    ]
                }),
                "wish" => json!({
                    "spell": null,
                    "spells": [
                        {"id": "spell-9", "name": "Wish", "image": "https://img.test/wish.png"}
                    ]
                }),
                "spell-7" => json!({
                    "spell": {"id": "spell-7", "name": "Scrying", "image": "https://img.test/scry.png"},
                    "spells": []
                }),
                _ => json!({"spell": null, "spells": []}),
            };
            Json(json!({"data": data}))
        }),
    )
}

/// App whose config points at live fixture services.
async fn app_with_upstreams() -> TestApp {
    let mut config = Config::default_for_test();
    config.sheet_service_url = spawn_upstream(sheet_service()).await;
    config.spell_service_url = spawn_upstream(spell_service()).await;
    TestApp::with_config(config).await
}

fn user() -> User {
    serde_json::from_value(json!({"id": "u1", "username": "ada"})).unwrap()
}

fn command(value: serde_json::Value) -> CommandData {
    serde_json::from_value(value).unwrap()
}

async fn run(state: &AppState, data: CommandData) -> Option<FollowUp> {
    commands::dispatch(state, &data, &user(), "tok-abcdefgh").await.unwrap()
}

fn content(followup: &FollowUp) -> &str {
    followup.content.as_deref().unwrap_or_default()
}

#[tokio::test]
async fn sync_then_roll_resolves_sheet_variables() {
    let app = app_with_upstreams().await;

    let synced = run(
        &app.state,
        command(json!({"name": "sync", "type": 1,
            "options": [{"name": "id", "type": 3, "value": "42"}]})),
    )
    .await
    .unwrap();
    assert_eq!(content(&synced), "Synced **Mordenkainen**.");

    let rolled = run(
        &app.state,
        command(json!({"name": "roll", "type": 1,
            "options": [{"name": "dice", "type": 3, "value": "1d1 + strength"}]})),
    )
    .await
    .unwrap();
    assert!(content(&rolled).contains("`1d1 + strength`"));
    assert!(content(&rolled).ends_with("**5**"));
}

#[tokio::test]
async fn sync_without_id_refreshes_the_cached_sheet() {
    let app = app_with_upstreams().await;

    run(
        &app.state,
        command(json!({"name": "sync", "type": 1,
            "options": [{"name": "id", "type": 3, "value": "42"}]})),
    )
    .await;

    let refreshed = run(
        &app.state,
        command(json!({"name": "sync", "type": 1})),
    )
    .await
    .unwrap();
    assert_eq!(content(&refreshed), "Synced **Mordenkainen**.");
}

#[tokio::test]
async fn sync_with_nothing_cached_fails_without_an_upstream_call() {
    let app = app_with_upstreams().await;

    let failed = run(&app.state, command(json!({"name": "sync", "type": 1})))
        .await
        .unwrap();

    assert!(content(&failed).contains("Make sure your sheet still exists"));
    assert!(queries::load(&app.state.db, "u1").await.unwrap().is_none());
}

#[tokio::test]
async fn sync_of_a_missing_or_private_sheet_leaves_the_cache_untouched() {
    let app = app_with_upstreams().await;

    for sheet_id in ["nope", "13"] {
        let failed = run(
            &app.state,
            command(json!({"name": "sync", "type": 1,
                "options": [{"name": "id", "type": 3, "value": sheet_id}]})),
        )
        .await
        .unwrap();
        assert!(content(&failed).contains("Make sure your sheet still exists"));
    }
    assert!(queries::load(&app.state.db, "u1").await.unwrap().is_none());
}

#[tokio::test]
async fn roll_without_a_sheet_gets_no_variables() {
    let app = app_with_upstreams().await;

    let rolled = run(
        &app.state,
        command(json!({"name": "roll", "type": 1,
            "options": [{"name": "dice", "type": 3, "value": "1d1"}]})),
    )
    .await
    .unwrap();
    assert!(content(&rolled).ends_with("**1**"));

    let unknown_var = run(
        &app.state,
        command(json!({"name": "roll", "type": 1,
            "options": [{"name": "dice", "type": 3, "value": "1d1 + strength"}]})),
    )
    .await
    .unwrap();
    assert!(content(&unknown_var).contains("unknown variable"));
}

#[tokio::test]
async fn roll_falls_back_to_the_stored_sheet_when_revalidation_fails() {
    // Unroutable upstreams: every revalidation attempt fails.
    let app = TestApp::new().await;
    let sheet: Sheet = serde_json::from_value(json!({
        "id": "42",
        "ownerId": "owner-1",
        "public": true,
        "name": "Mordenkainen",
        "stats": {"strength": 4.0}
    }))
    .unwrap();
    queries::store(&app.state.db, "u1", &sheet).await.unwrap();

    let rolled = run(
        &app.state,
        command(json!({"name": "roll", "type": 1,
            "options": [{"name": "dice", "type": 3, "value": "1d1 + strength"}]})),
    )
    .await
    .unwrap();

    // The stored snapshot still resolves variables; the row is untouched.
    assert!(content(&rolled).ends_with("**5**"));
    let cached = queries::load(&app.state.db, "u1").await.unwrap().unwrap();
    assert_eq!(cached.sheet, sheet);
}

#[tokio::test]
async fn unparsable_roll_yields_a_diagnostic_not_an_error() {
    let app = app_with_upstreams().await;

    let outcome = commands::dispatch(
        &app.state,
        &command(json!({"name": "r", "type": 1,
            "options": [{"name": "dice", "type": 3, "value": "1d20 + + 5"}]})),
        &user(),
        "tok",
    )
    .await;

    let followup = outcome.expect("never a protocol error").unwrap();
    assert!(content(&followup).starts_with("Could not roll"));
}

#[tokio::test]
async fn spell_exact_id_hit_wins_and_renders_an_image_embed() {
    let app = app_with_upstreams().await;

    let followup = run(
        &app.state,
        command(json!({"name": "spell", "type": 1,
            "options": [{"name": "name", "type": 3, "value": "spell-7"}]})),
    )
    .await
    .unwrap();

    let embeds = followup.embeds.unwrap();
    let embed = &embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Scrying"));
    assert_eq!(
        embed.image.as_ref().map(|i| i.url.as_str()),
        Some("https://img.test/scry.png")
    );
}

#[tokio::test]
async fn spell_single_fuzzy_hit_auto_resolves() {
    let app = app_with_upstreams().await;

    let followup = run(
        &app.state,
        command(json!({"name": "spell", "type": 1,
            "options": [{"name": "name", "type": 3, "value": "wish"}]})),
    )
    .await
    .unwrap();

    let embeds = followup.embeds.unwrap();
    let embed = &embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Wish"));
}

#[tokio::test]
async fn spell_multiple_hits_disambiguate_with_correlation_ids() {
    let app = app_with_upstreams().await;

    let followup = run(
        &app.state,
        command(json!({"name": "spell", "type": 1,
            "options": [{"name": "name", "type": 3, "value": "fire"}]})),
    )
    .await
    .unwrap();

    let rows = followup.components.unwrap();
    assert_eq!(rows.len(), 1);
    let ids: Vec<&str> = rows[0]
        .components
        .iter()
        .map(|b| b.custom_id.as_str())
        .collect();
    assert_eq!(ids.len(), 3);
    // Each selector carries the truncated interaction token.
    assert!(ids.iter().all(|id| id.contains("tok-abcd")));
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn spell_no_hits_is_not_found_text() {
    let app = app_with_upstreams().await;

    let followup = run(
        &app.state,
        command(json!({"name": "spell", "type": 1,
            "options": [{"name": "name", "type": 3, "value": "polymorph"}]})),
    )
    .await
    .unwrap();

    assert!(content(&followup).contains("No spell found"));
}

#[tokio::test]
async fn unknown_command_produces_no_follow_up() {
    let app = app_with_upstreams().await;

    let outcome = run(&app.state, command(json!({"name": "help", "type": 1}))).await;
    assert!(outcome.is_none());
}

#[tokio::test]
async fn missing_required_option_is_user_facing() {
    let app = app_with_upstreams().await;

    let err = commands::dispatch(
        &app.state,
        &command(json!({"name": "roll", "type": 1})),
        &user(),
        "tok",
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.user_message().unwrap(),
        "Missing required option `dice`."
    );
}
