//! Dicewarden Server
//!
//! Webhook backend for a chat platform's slash-command interactions:
//! signature verification, deferred acknowledgment, detached command
//! execution, and one-shot follow-up delivery.

pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod dice;
pub mod interactions;
pub mod sheets;
pub mod spells;
