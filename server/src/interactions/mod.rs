//! Interaction Protocol
//!
//! Inbound slash-command webhook handling: Ed25519 request verification,
//! payload classification (ping vs. command), the synchronous deferred
//! acknowledgment, and one-shot follow-up delivery for the detached
//! command continuation.

pub mod error;
pub mod followup;
pub mod handlers;
pub mod types;
pub mod verify;
