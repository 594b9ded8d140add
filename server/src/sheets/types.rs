//! Sheet Types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Externally owned character-sheet record.
///
/// The upstream service resolves base/bonus/proficiency fields into the
/// flat `stats` map before it reaches us; stat values arrive ready to use
/// as roll variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Sheet id on the upstream service.
    pub id: String,
    /// Owning user on the upstream service.
    pub owner_id: String,
    /// Whether the sheet is publicly readable.
    pub public: bool,
    /// Character display name.
    pub name: String,
    /// Resolved stat name to numeric value.
    #[serde(default)]
    pub stats: HashMap<String, f64>,
}
