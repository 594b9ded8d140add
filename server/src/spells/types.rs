//! Spell Types

use serde::Deserialize;

/// One spell record from the spell service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    /// Card image URL, when the service has one.
    pub image: Option<String>,
}

/// Combined result of one search query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchData {
    /// Exact-id hit, if the term was an id.
    pub spell: Option<Spell>,
    /// Fuzzy-name hits, service-ranked.
    #[serde(default)]
    pub spells: Vec<Spell>,
}
