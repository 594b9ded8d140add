//! Spell Service Client
//!
//! A single fixed GraphQL query with one string variable; the service
//! resolves it as both an exact id and a fuzzy name in one round trip.

use serde::Deserialize;
use serde_json::json;

use super::SearchData;

/// Combined exact-id + fuzzy-name search.
const SPELL_QUERY: &str = r"
query SpellSearch($query: String!) {
  spell(id: $query) {
    id
    name
    image
  }
  spells(name: $query) {
    id
    name
    image
  }
}
";

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<SearchData>,
}

/// Run one search against the spell service.
pub async fn search(
    http: &reqwest::Client,
    url: &str,
    term: &str,
) -> reqwest::Result<SearchData> {
    let body = json!({
        "query": SPELL_QUERY,
        "variables": { "query": term },
    });

    let response: GraphQlResponse = http
        .post(url)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.data.unwrap_or_default())
}
