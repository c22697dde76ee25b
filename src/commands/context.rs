//! Per-interaction context handed to command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Track reply state so failures can pick reply vs edit
//! - 1.0.0: Initial implementation

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::core::embeds::Embed;

/// Which kind of interaction produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// A slash command
    ChatInput,
    UserContextMenu,
    MessageContextMenu,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildRef {
    pub id: u64,
    pub name: Option<String>,
    pub member_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelRef {
    pub id: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: u64,
    /// `name#discriminator`, or the bare name for migrated accounts
    pub tag: String,
}

/// A raw option as received with the interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Sub-command options
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionValue>,
}

/// An inbound command interaction, detached from the gateway library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionEvent {
    pub interaction_id: u64,
    pub kind: InteractionKind,
    pub command_name: String,
    pub user: UserRef,
    pub guild: Option<GuildRef>,
    pub channel: ChannelRef,
    pub options: Vec<OptionValue>,
}

impl InteractionEvent {
    fn option_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.options
            .iter()
            .find(|opt| opt.name == name)
            .and_then(|opt| opt.value.as_ref())
    }

    /// Get boolean option from the slash command
    pub fn bool_option(&self, name: &str) -> Option<bool> {
        self.option_value(name).and_then(|val| val.as_bool())
    }

    /// Render an option value as plain text, whatever its type
    pub fn option_text(&self, name: &str) -> Option<String> {
        self.option_value(name).map(|val| match val {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Message sent in response to an interaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    /// Visible only to the invoking user
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }
}

/// Sends responses for one interaction
///
/// Implemented over serenity's HTTP client in production and by recording
/// doubles in tests.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Send the initial response
    async fn reply(&self, reply: &Reply) -> Result<()>;

    /// Acknowledge now, respond later through `edit_reply`
    async fn defer(&self, ephemeral: bool) -> Result<()>;

    /// Replace the initial (or deferred) response
    async fn edit_reply(&self, reply: &Reply) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    NotReplied,
    Deferred,
    Replied,
}

impl ReplyState {
    /// Whether the single initial response has been used up
    pub fn is_acknowledged(self) -> bool {
        self != ReplyState::NotReplied
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ReplyState::Deferred,
            2 => ReplyState::Replied,
            _ => ReplyState::NotReplied,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ReplyState::NotReplied => 0,
            ReplyState::Deferred => 1,
            ReplyState::Replied => 2,
        }
    }
}

/// Everything a command handler gets for one invocation
pub struct InteractionContext {
    event: InteractionEvent,
    responder: Arc<dyn InteractionResponder>,
    state: AtomicU8,
}

impl InteractionContext {
    pub fn new(event: InteractionEvent, responder: Arc<dyn InteractionResponder>) -> Self {
        Self {
            event,
            responder,
            state: AtomicU8::new(ReplyState::NotReplied.as_u8()),
        }
    }

    pub fn event(&self) -> &InteractionEvent {
        &self.event
    }

    pub fn command_name(&self) -> &str {
        &self.event.command_name
    }

    pub fn reply_state(&self) -> ReplyState {
        ReplyState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Send the initial response
    ///
    /// An interaction accepts one initial response; a second call fails
    /// without reaching Discord.
    pub async fn reply(&self, reply: Reply) -> Result<()> {
        self.claim_initial(ReplyState::Replied)?;
        let sent = self.responder.reply(&reply).await;
        self.release_on_error(sent)
    }

    /// Acknowledge the interaction, showing a loading state until `edit_reply`
    pub async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.claim_initial(ReplyState::Deferred)?;
        let sent = self.responder.defer(ephemeral).await;
        self.release_on_error(sent)
    }

    /// Move out of `NotReplied` before sending, so concurrent callers can't
    /// both use the initial response
    fn claim_initial(&self, next: ReplyState) -> Result<()> {
        if self
            .state
            .compare_exchange(
                ReplyState::NotReplied.as_u8(),
                next.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            bail!(
                "interaction {} for '{}' was already acknowledged",
                self.event.interaction_id,
                self.event.command_name
            );
        }
        Ok(())
    }

    /// A rejected initial response leaves the interaction unanswered
    fn release_on_error(&self, sent: Result<()>) -> Result<()> {
        if sent.is_err() {
            self.state
                .store(ReplyState::NotReplied.as_u8(), Ordering::Release);
        }
        sent
    }

    /// Edit the response sent by `reply` or `defer`
    pub async fn edit_reply(&self, reply: Reply) -> Result<()> {
        if !self.reply_state().is_acknowledged() {
            bail!(
                "interaction {} for '{}' has no response to edit",
                self.event.interaction_id,
                self.event.command_name
            );
        }
        self.responder.edit_reply(&reply).await?;
        self.state.store(ReplyState::Replied.as_u8(), Ordering::Release);
        Ok(())
    }
}
