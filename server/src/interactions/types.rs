//! Interaction Wire Types
//!
//! Inbound payloads and outbound responses for the slash-command
//! protocol. Shape-varying payloads are modeled as sum types keyed on the
//! platform's numeric discriminators rather than by probing field
//! presence.

use bitflags::bitflags;
use serde::{Deserialize, Serialize, Serializer};

/// Inbound interaction type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum InteractionType {
    /// Liveness probe from the platform.
    Ping,
    /// Slash-command invocation.
    ApplicationCommand,
    /// Interactive-component press (not served here beyond rejection).
    MessageComponent,
}

impl TryFrom<u8> for InteractionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::MessageComponent),
            other => Err(format!("unknown interaction type {other}")),
        }
    }
}

/// Command subtype discriminator. Only chat-input is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum CommandType {
    /// Text slash command.
    ChatInput,
    /// User context-menu command.
    User,
    /// Message context-menu command.
    Message,
}

impl TryFrom<u8> for CommandType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ChatInput),
            2 => Ok(Self::User),
            3 => Ok(Self::Message),
            other => Err(format!("unknown command type {other}")),
        }
    }
}

/// Invoking user identity.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Platform user id (opaque snowflake string).
    pub id: String,
    /// Display username.
    pub username: String,
}

/// Guild-membership wrapper around the invoking user.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: Option<User>,
}

/// A typed command option value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Bool(bool),
    Number(f64),
}

/// One named option on a command invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    /// Platform option-type tag (string = 3, boolean = 5, ...).
    #[serde(rename = "type")]
    pub kind: u8,
    pub value: Option<OptionValue>,
}

/// Command payload of an application-command interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandData {
    /// Exact-name lookup of a string option. Absence is `None`, distinct
    /// from an empty string.
    #[must_use]
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.options.iter().find(|o| o.name == name).and_then(|o| {
            if let Some(OptionValue::String(s)) = &o.value {
                Some(s.as_str())
            } else {
                None
            }
        })
    }

    /// Exact-name lookup of a boolean option.
    #[must_use]
    pub fn option_bool(&self, name: &str) -> Option<bool> {
        self.options.iter().find(|o| o.name == name).and_then(|o| {
            if let Some(OptionValue::Bool(b)) = &o.value {
                Some(*b)
            } else {
                None
            }
        })
    }
}

/// One inbound interaction event.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Interaction id.
    pub id: String,
    /// One-time token scoping the deferred ack and follow-up.
    pub token: String,
    /// Command payload (commands only).
    pub data: Option<CommandData>,
    /// Invoking user when the command was run outside a guild.
    pub user: Option<User>,
    /// Guild-membership wrapper when run inside a guild.
    pub member: Option<Member>,
}

impl Interaction {
    /// The invoking user, from the top level or the membership wrapper.
    #[must_use]
    pub fn invoker(&self) -> Option<&User> {
        self.user
            .as_ref()
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()))
    }
}

bitflags! {
    /// Message flags on responses and follow-ups.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u32 {
        /// Reply visible only to the invoking user.
        const EPHEMERAL = 1 << 6;
        /// Message uses the rich component layout.
        const COMPONENTS_V2 = 1 << 15;
    }
}

/// Outbound response type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Ack for a ping.
    Pong,
    /// Deferred channel message: placeholder now, follow-up later.
    DeferredChannelMessage,
}

impl From<ResponseType> for u8 {
    fn from(value: ResponseType) -> Self {
        match value {
            ResponseType::Pong => 1,
            ResponseType::DeferredChannelMessage => 5,
        }
    }
}

impl Serialize for ResponseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*self))
    }
}

/// Synchronous response to an interaction.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    /// Ping ack.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// Deferred placeholder carrying content and flags.
    #[must_use]
    pub fn deferred(content: &str, flags: MessageFlags) -> Self {
        Self {
            kind: ResponseType::DeferredChannelMessage,
            data: Some(ResponseData {
                content: Some(content.to_string()),
                flags: if flags.is_empty() { None } else { Some(flags) },
            }),
        }
    }
}

/// Body of a synchronous response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_flags"
    )]
    pub flags: Option<MessageFlags>,
}

/// Flags serialize as their raw bits on the wire.
fn serialize_flags<S: Serializer>(
    flags: &Option<MessageFlags>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match flags {
        Some(flags) => serializer.serialize_u32(flags.bits()),
        None => serializer.serialize_none(),
    }
}

/// An image attached to an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// A rich embed on a follow-up message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

/// A pressable button inside an action row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    pub label: String,
    pub custom_id: String,
}

impl Button {
    /// A secondary-style button carrying a correlation id.
    #[must_use]
    pub fn secondary(label: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self {
            kind: 2,
            style: 2,
            label: label.into(),
            custom_id: custom_id.into(),
        }
    }
}

/// A horizontal row of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    pub components: Vec<Button>,
}

impl ActionRow {
    #[must_use]
    pub fn buttons(components: Vec<Button>) -> Self {
        Self {
            kind: 1,
            components,
        }
    }
}

/// Final message delivered after the deferred ack.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FollowUp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
}

impl FollowUp {
    /// A plain text follow-up.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// A single-embed follow-up.
    #[must_use]
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: Some(vec![embed]),
            ..Self::default()
        }
    }
}
