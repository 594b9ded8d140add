//! Spell Lookup
//!
//! Client for the external spell service's GraphQL endpoint. One combined
//! query per search: exact-id lookup and fuzzy-name lookup together.

pub mod client;
mod types;

pub use types::{SearchData, Spell};
