//! # Canned Reply Commands
//!
//! Commands declared in YAML (or JSON) files that answer with a fixed
//! message. Placeholders are filled from the interaction:
//!
//! - `${user}`, `${guild}`, `${channel}`
//! - `${<option name>}` for any option the user supplied
//!
//! Every text of the reply is filled: content, embed title, description,
//! footer and field names and values. Options can't be named after the
//! built-in placeholders; the loader rejects such files.
//!
//! ```yaml
//! name: rules
//! description: Show the server rules
//! options:
//!   - name: topic
//!     description: Rule topic
//!     type: string
//! reply:
//!   content: "Hi ${user}, rules about ${topic} are pinned in #${channel}."
//!   ephemeral: true
//! ```
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::context::{InteractionContext, InteractionEvent, Reply};
use super::handler::SlashCommand;
use super::schema::{CommandSchema, OptionSchema};
use crate::core::embeds::{Embed, EmbedField};

/// Placeholders filled from the interaction itself
pub const RESERVED_PLACEHOLDERS: &[&str] = &["user", "guild", "channel"];

/// A command file as written on disk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CannedCommand {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<OptionSchema>,
    pub reply: CannedReply,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CannedReply {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embed: Option<Embed>,
    #[serde(default)]
    pub ephemeral: bool,
}

impl CannedCommand {
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Whether the file declares something to send
    pub fn has_reply(&self) -> bool {
        self.reply.content.as_deref().is_some_and(|c| !c.trim().is_empty())
            || self.reply.embed.is_some()
    }

    /// Option names that collide with a built-in placeholder
    pub fn reserved_option_names(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|option| option.name.as_str())
            .filter(|name| RESERVED_PLACEHOLDERS.contains(name))
            .collect()
    }

    fn render(&self, event: &InteractionEvent) -> Reply {
        let fill = |text: &Option<String>| text.as_deref().map(|t| fill_placeholders(t, event));

        let embed = self.reply.embed.as_ref().map(|embed| Embed {
            title: fill(&embed.title),
            description: fill(&embed.description),
            color: embed.color,
            footer: fill(&embed.footer),
            fields: embed
                .fields
                .iter()
                .map(|field| EmbedField {
                    name: fill_placeholders(&field.name, event),
                    value: fill_placeholders(&field.value, event),
                    inline: field.inline,
                })
                .collect(),
        });

        Reply {
            content: self
                .reply
                .content
                .as_deref()
                .map(|c| fill_placeholders(c, event)),
            embeds: embed.into_iter().collect(),
            ephemeral: self.reply.ephemeral,
        }
    }
}

#[async_trait]
impl SlashCommand for CannedCommand {
    fn schema(&self) -> CommandSchema {
        CommandSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
        }
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<()> {
        ctx.reply(self.render(ctx.event())).await
    }
}

/// Replace `${...}` placeholders; unknown names render as empty text
pub fn fill_placeholders(template: &str, event: &InteractionEvent) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                output.push_str(&placeholder_value(&after[..end], event));
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated, keep it verbatim
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}

fn placeholder_value(key: &str, event: &InteractionEvent) -> String {
    match key {
        "user" => event.user.tag.clone(),
        "guild" => event
            .guild
            .as_ref()
            .and_then(|g| g.name.clone())
            .unwrap_or_default(),
        "channel" => event.channel.name.clone().unwrap_or_default(),
        option => event.option_text(option).unwrap_or_default(),
    }
}
