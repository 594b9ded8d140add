//! Character Sheets
//!
//! Upstream sheet-service client plus the single-slot-per-user cache that
//! supplies named variables to roll evaluation. The cache durably stores
//! sheet identity; content is revalidated against the upstream service on
//! every read.

pub mod cache;
pub mod client;
pub mod queries;
mod types;

pub use types::Sheet;
