//! Embed descriptions for interaction replies
//!
//! Embeds are described with a plain data type so command handlers and the
//! router never touch serenity builders directly. The Discord adapter turns
//! them into `CreateEmbed` values at send time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::response::{
    truncate_for_embed, truncate_to, EMBED_FOOTER_LIMIT, EMBED_TITLE_LIMIT,
};
use serde::{Deserialize, Serialize};
use serenity::builder::CreateEmbed;

/// Accent color of the error notice
pub const ERROR_COLOR: u32 = 0xF7A4A4;

const ERROR_FOOTER: &str =
    "Our team has been notified of this error. Still having issues? Contact us! Check /help for more info.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Embed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Build the serenity embed, clamping text to Discord's limits
    pub fn to_create_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        if let Some(title) = &self.title {
            embed.title(truncate_to(title, EMBED_TITLE_LIMIT));
        }
        if let Some(description) = &self.description {
            embed.description(truncate_for_embed(description));
        }
        if let Some(color) = self.color {
            embed.color(color);
        }
        if let Some(footer) = &self.footer {
            let text = truncate_to(footer, EMBED_FOOTER_LIMIT);
            embed.footer(|f| f.text(text));
        }
        for field in &self.fields {
            embed.field(&field.name, &field.value, field.inline);
        }
        embed
    }
}

/// The notice shown to a user whose command failed
pub fn error_notice(command_name: &str) -> Embed {
    Embed::new()
        .color(ERROR_COLOR)
        .title("❌ Error during command execution")
        .description(format!(
            "An error occurred while executing the command '{command_name}'."
        ))
        .footer(ERROR_FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_mentions_command() {
        let notice = error_notice("server");
        assert_eq!(notice.color, Some(ERROR_COLOR));
        assert!(notice.description.unwrap().contains("'server'"));
        assert!(notice.footer.is_some());
    }

    #[test]
    fn test_to_create_embed_sets_fields() {
        let embed = Embed::new()
            .title("Title")
            .description("Body")
            .color(0x00FF00)
            .field("Members", "42", true)
            .to_create_embed();

        assert_eq!(embed.0.get("title").and_then(|v| v.as_str()), Some("Title"));
        assert_eq!(embed.0.get("description").and_then(|v| v.as_str()), Some("Body"));
        assert_eq!(embed.0.get("color").and_then(|v| v.as_u64()), Some(0x00FF00));
        let fields = embed.0.get("fields").and_then(|v| v.as_array()).unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_to_create_embed_truncates_title() {
        let embed = Embed::new().title("t".repeat(400)).to_create_embed();
        let title = embed.0.get("title").and_then(|v| v.as_str()).unwrap();
        assert!(title.len() <= EMBED_TITLE_LIMIT);
    }

    #[test]
    fn test_embed_from_yaml() {
        let embed: Embed = serde_yaml::from_str("title: Rules\ncolor: 255\n").unwrap();
        assert_eq!(embed.title.as_deref(), Some("Rules"));
        assert_eq!(embed.color, Some(255));
        assert!(embed.fields.is_empty());
    }
}
